//! Retailer dashboard figures.

pub mod retailer;

pub use retailer::{AnalyticsService, RetailerAnalytics};
