//! Campaign entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Campaign lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "campaign_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Ended,
}

text_enum!(CampaignStatus, "campaign status" {
    Draft => "draft",
    Active => "active",
    Ended => "ended",
});

/// Who can see a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "visibility_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VisibilityLevel {
    #[default]
    Public,
    Private,
}

text_enum!(VisibilityLevel, "visibility level" {
    Public => "public",
    Private => "private",
});

/// A time-boxed discount campaign run by a retailer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    pub retailer_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Percentage off, `NUMERIC(5,2)`.
    pub discount_percentage: Option<Decimal>,
    /// Product ids included (JSON array).
    pub products_included: Option<serde_json::Value>,
    pub banner_image_url: Option<String>,
    pub status: CampaignStatus,
    pub visibility_level: VisibilityLevel,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaign {
    pub retailer_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub discount_percentage: Option<Decimal>,
    pub products_included: Option<serde_json::Value>,
    pub banner_image_url: Option<String>,
    pub status: CampaignStatus,
    pub visibility_level: VisibilityLevel,
}

/// Partial campaign update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub discount_percentage: Option<Decimal>,
    pub products_included: Option<serde_json::Value>,
    pub banner_image_url: Option<String>,
    pub status: Option<CampaignStatus>,
    pub visibility_level: Option<VisibilityLevel>,
}

impl UpdateCampaign {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.discount_percentage.is_none()
            && self.products_included.is_none()
            && self.banner_image_url.is_none()
            && self.status.is_none()
            && self.visibility_level.is_none()
    }

    /// Apply the present fields to a campaign in place.
    pub fn apply_to(&self, campaign: &mut Campaign) {
        if let Some(name) = &self.name {
            campaign.name = name.clone();
        }
        if let Some(start) = self.start_date {
            campaign.start_date = start;
        }
        if let Some(end) = self.end_date {
            campaign.end_date = end;
        }
        if let Some(discount) = self.discount_percentage {
            campaign.discount_percentage = Some(discount);
        }
        if let Some(products) = &self.products_included {
            campaign.products_included = Some(products.clone());
        }
        if let Some(banner) = &self.banner_image_url {
            campaign.banner_image_url = Some(banner.clone());
        }
        if let Some(status) = self.status {
            campaign.status = status;
        }
        if let Some(level) = self.visibility_level {
            campaign.visibility_level = level;
        }
    }
}
