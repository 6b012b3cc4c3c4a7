//! # atelier-entity
//!
//! Domain entity models for the Atelier marketplace. Every struct in this
//! crate represents a database row or a value object passed to the stores.
//! Rows derive `sqlx::FromRow`; JSON uses camelCase field names.

#[macro_use]
mod macros;

pub mod auction;
pub mod campaign;
pub mod cart;
pub mod money;
pub mod negotiation;
pub mod notification;
pub mod order;
pub mod product;
pub mod review;
pub mod room_design;
pub mod user;
