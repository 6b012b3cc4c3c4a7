//! Marketing campaign entities.

pub mod model;

pub use model::{Campaign, CampaignStatus, CreateCampaign, UpdateCampaign, VisibilityLevel};
