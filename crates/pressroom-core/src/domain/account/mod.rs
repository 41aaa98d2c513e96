//! Account domain module
//!
//! Users and the refresh tokens issued to them.

pub mod repository;
pub mod token;
pub mod user;

pub use repository::{
    UserFilter, UserRepository, UserSearchParams, UserSearchResult, UserTokenRepository,
    USER_SORTABLE_FIELDS,
};
pub use token::{UserToken, TOKEN_TTL_SECS};
pub use user::User;
