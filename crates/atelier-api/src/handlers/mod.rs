//! Route handlers organized by domain.

pub mod account;
pub mod analytics;
pub mod auction;
pub mod auth;
pub mod campaign;
pub mod cart;
pub mod health;
pub mod negotiation;
pub mod notification;
pub mod order;
pub mod product;
pub mod review;
pub mod room_design;
pub mod ws;
