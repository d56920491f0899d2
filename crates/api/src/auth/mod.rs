//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification and strength rules.
//! - [`jwt`] -- HS256 access-token generation and validation.

pub mod jwt;
pub mod password;
