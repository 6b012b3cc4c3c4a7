//! Retailer marketing campaigns.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::CampaignStore;
use atelier_entity::campaign::{
    Campaign, CampaignStatus, CreateCampaign, UpdateCampaign, VisibilityLevel,
};

use crate::context::RequestContext;

/// Data for a new campaign.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub discount_percentage: Option<Decimal>,
    pub products_included: Option<serde_json::Value>,
    pub banner_image_url: Option<String>,
    pub status: Option<CampaignStatus>,
    pub visibility_level: Option<VisibilityLevel>,
}

/// Listing filter for `GET /api/campaigns`.
#[derive(Debug, Clone, Default)]
pub struct CampaignQuery {
    pub retailer_id: Option<Uuid>,
    pub active: bool,
}

#[derive(Clone)]
pub struct CampaignService {
    campaigns: Arc<dyn CampaignStore>,
}

impl CampaignService {
    /// Creates a new campaign service.
    pub fn new(campaigns: Arc<dyn CampaignStore>) -> Self {
        Self { campaigns }
    }

    /// Lists campaigns of a retailer, or every active one.
    pub async fn list(&self, query: CampaignQuery) -> Result<Vec<Campaign>, AppError> {
        match query.retailer_id {
            Some(retailer_id) => {
                let mut campaigns = self.campaigns.list_by_retailer(retailer_id).await?;
                if query.active {
                    campaigns.retain(|c| c.status == CampaignStatus::Active);
                }
                Ok(campaigns)
            }
            None if query.active => self.campaigns.list_active().await,
            None => Err(AppError::validation("retailerId or active=true is required")),
        }
    }

    /// Creates a campaign for the calling retailer.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: NewCampaign,
    ) -> Result<Campaign, AppError> {
        let retailer_id = ctx.require_retailer()?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Campaign name is required"));
        }
        check_window(data.start_date, data.end_date)?;
        check_discount(data.discount_percentage)?;

        let campaign = self
            .campaigns
            .create(CreateCampaign {
                retailer_id,
                name: data.name,
                start_date: data.start_date,
                end_date: data.end_date,
                discount_percentage: data.discount_percentage,
                products_included: data.products_included,
                banner_image_url: data.banner_image_url,
                status: data.status.unwrap_or_default(),
                visibility_level: data.visibility_level.unwrap_or_default(),
            })
            .await?;

        info!(campaign_id = %campaign.id, retailer_id = %retailer_id, "Campaign created");
        Ok(campaign)
    }

    /// Updates a campaign owned by the caller.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateCampaign,
    ) -> Result<Campaign, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        check_discount(data.discount_percentage)?;

        let mut current = self
            .campaigns
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Campaign not found"))?;
        if !ctx.is_retailer(current.retailer_id) {
            return Err(AppError::authorization("Not your campaign"));
        }
        data.apply_to(&mut current);
        check_window(current.start_date, current.end_date)?;

        let updated = self
            .campaigns
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Campaign not found"))?;
        info!(campaign_id = %id, status = %updated.status, "Campaign updated");
        Ok(updated)
    }
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::validation("End date must be after the start date"));
    }
    Ok(())
}

fn check_discount(discount: Option<Decimal>) -> Result<(), AppError> {
    if discount.is_some_and(|d| d.is_sign_negative() || d > Decimal::ONE_HUNDRED) {
        return Err(AppError::validation("Discount must be between 0 and 100"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use atelier_core::ErrorKind;

    use super::*;
    use crate::testing::Fixture;

    fn diwali() -> NewCampaign {
        NewCampaign {
            name: "Diwali Edit".to_string(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(10),
            discount_percentage: Some("15".parse().unwrap()),
            products_included: Some(serde_json::json!([])),
            banner_image_url: None,
            status: None,
            visibility_level: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_activate() {
        let fx = Fixture::new();
        let retailer = Uuid::new_v4();
        let service = fx.campaigns();
        let campaign = service.create(&fx.retailer(retailer), diwali()).await.unwrap();
        assert_eq!(campaign.status, CampaignStatus::Draft);
        assert_eq!(campaign.visibility_level, VisibilityLevel::Public);

        let active = CampaignQuery {
            active: true,
            ..CampaignQuery::default()
        };
        assert!(service.list(active.clone()).await.unwrap().is_empty());

        service
            .update(
                &fx.retailer(retailer),
                campaign.id,
                UpdateCampaign {
                    status: Some(CampaignStatus::Active),
                    ..UpdateCampaign::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(service.list(active).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_campaign_rules() {
        let fx = Fixture::new();
        let service = fx.campaigns();
        let mut backwards = diwali();
        backwards.end_date = backwards.start_date - Duration::days(1);
        let mut greedy = diwali();
        greedy.discount_percentage = Some("120".parse().unwrap());
        let ctx = fx.retailer(Uuid::new_v4());

        assert_eq!(
            service.create(&ctx, backwards).await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            service.create(&ctx, greedy).await.unwrap_err().kind,
            ErrorKind::Validation
        );

        let campaign = service.create(&ctx, diwali()).await.unwrap();
        let stranger = service
            .update(
                &fx.retailer(Uuid::new_v4()),
                campaign.id,
                UpdateCampaign {
                    name: Some("Mine".to_string()),
                    ..UpdateCampaign::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(stranger.kind, ErrorKind::Authorization);
    }
}
