//! Security adapters - password hashing and token signing

pub mod hasher;
pub mod token;

pub use hasher::Argon2PasswordHasher;
pub use token::Ed25519TokenGenerator;
