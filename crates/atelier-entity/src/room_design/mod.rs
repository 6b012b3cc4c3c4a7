//! AI room design entities.

pub mod model;

pub use model::{CreateRoomDesign, RoomDesign};
