//! # atelier-core
//!
//! Core crate for the Atelier marketplace. Holds configuration schemas,
//! the unified error type and its HTTP mapping.
//!
//! This crate has **no** internal dependencies on other Atelier crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
