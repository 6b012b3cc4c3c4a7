//! AI-generated room visualizations.

pub mod generator;
pub mod service;

pub use generator::{ImageGenerator, ImageRequest, OpenAiImageGenerator};
pub use service::{DesignBrief, RoomDesignService};
