//! # atelier-auth
//!
//! Stateless authentication for the marketplace.
//!
//! - `jwt` issues and verifies HS256 bearer tokens carrying the caller's
//!   identity.
//! - `password` hashes and verifies account passwords with Argon2id.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
