//! Products, reviews and marketing campaigns.

pub mod campaign;
pub mod product;
pub mod review;

pub use campaign::{CampaignQuery, CampaignService, NewCampaign};
pub use product::{NewProduct, ProductService};
pub use review::{ReviewQuery, ReviewService};
