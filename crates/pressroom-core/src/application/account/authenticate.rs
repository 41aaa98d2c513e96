//! Authenticate user use case

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::application::ports::{PasswordHasher, TokenClaims, TokenGenerator};
use crate::domain::account::{UserRepository, UserToken, UserTokenRepository, TOKEN_TTL_SECS};
use crate::error::{Error, Result};

/// Input for [`AuthenticateUser`]
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateUserInput {
    pub email: String,
    pub password: String,
}

/// Public fields of the authenticated user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Output of a successful authentication
///
/// Carries the signed token, never the stored secret.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticateUserOutput {
    pub user: AuthenticatedUser,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Verify credentials and issue a signed token
///
/// An unknown email and a wrong password both fail with
/// `Error::InvalidCredentials` so callers cannot tell which check
/// failed.
pub struct AuthenticateUser<R, T, H, G>
where
    R: UserRepository,
    T: UserTokenRepository,
    H: PasswordHasher,
    G: TokenGenerator,
{
    users: Arc<R>,
    tokens: Arc<T>,
    hasher: Arc<H>,
    token_generator: Arc<G>,
}

impl<R, T, H, G> AuthenticateUser<R, T, H, G>
where
    R: UserRepository,
    T: UserTokenRepository,
    H: PasswordHasher,
    G: TokenGenerator,
{
    pub fn new(users: Arc<R>, tokens: Arc<T>, hasher: Arc<H>, token_generator: Arc<G>) -> Self {
        Self {
            users,
            tokens,
            hasher,
            token_generator,
        }
    }

    pub async fn execute(&self, input: AuthenticateUserInput) -> Result<AuthenticateUserOutput> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            return Err(Error::InvalidCredentials);
        }

        let claims = TokenClaims {
            user_id: user.id,
            email: user.email.clone(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            exp: (Utc::now() + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        };
        let token = self.token_generator.generate(&claims)?;

        let user_token = UserToken::new(user.id, token.clone());
        self.tokens.insert(&user_token).await?;
        debug!(user_id = %user.id, "user authenticated");

        Ok(AuthenticateUserOutput {
            user: AuthenticatedUser {
                id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
                is_staff: user.is_staff,
                is_superuser: user.is_superuser,
            },
            token,
            token_type: "Bearer".to_string(),
            expires_in: TOKEN_TTL_SECS,
        })
    }
}
