use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::campaign::{Campaign, CampaignStatus, CreateCampaign, UpdateCampaign};
use atelier_entity::negotiation::{
    CreateNegotiation, CreateNegotiationMessage, Negotiation, NegotiationMessage,
    NegotiationStatus,
};
use atelier_entity::notification::{CreateNotification, Notification};
use atelier_entity::review::{CreateReview, Review, ReviewStatus, UpdateReview};
use atelier_entity::room_design::{CreateRoomDesign, RoomDesign};
use atelier_entity::user::Identity;

use super::{MemoryStore, newest_first};
use crate::store::{
    CampaignStore, NegotiationStore, NotificationStore, ReviewStore, RoomDesignStore,
};

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_product(&self, product_id: Uuid) -> AppResult<Vec<Review>> {
        let tables = self.tables.read().await;
        let rows = tables.reviews.iter().filter(|r| r.product_id == product_id);
        Ok(newest_first(rows.cloned(), |r| r.review_date))
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Review>> {
        let tables = self.tables.read().await;
        let rows = tables.reviews.iter().filter(|r| r.retailer_id == retailer_id);
        Ok(newest_first(rows.cloned(), |r| r.review_date))
    }

    async fn create(&self, data: CreateReview) -> AppResult<Review> {
        let review = Review {
            id: Uuid::new_v4(),
            customer_id: data.customer_id,
            customer_name: data.customer_name,
            retailer_id: data.retailer_id,
            product_id: data.product_id,
            product_name: data.product_name,
            rating: data.rating,
            comment: data.comment,
            response: None,
            status: ReviewStatus::Pending,
            review_date: Utc::now(),
        };
        self.tables.write().await.reviews.push(review.clone());
        Ok(review)
    }

    async fn update(&self, id: Uuid, data: &UpdateReview) -> AppResult<Option<Review>> {
        let mut tables = self.tables.write().await;
        Ok(tables.reviews.iter_mut().find(|r| r.id == id).map(|r| {
            if let Some(response) = &data.response {
                r.response = Some(response.clone());
            }
            if let Some(status) = data.status {
                r.status = status;
            }
            r.clone()
        }))
    }
}

#[async_trait]
impl CampaignStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>> {
        let tables = self.tables.read().await;
        Ok(tables.campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Campaign>> {
        let tables = self.tables.read().await;
        let rows = tables.campaigns.iter().filter(|c| c.retailer_id == retailer_id);
        Ok(newest_first(rows.cloned(), |c| c.created_at))
    }

    async fn list_active(&self) -> AppResult<Vec<Campaign>> {
        let tables = self.tables.read().await;
        let rows = tables
            .campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Active);
        Ok(newest_first(rows.cloned(), |c| c.created_at))
    }

    async fn create(&self, data: CreateCampaign) -> AppResult<Campaign> {
        let campaign = Campaign {
            id: Uuid::new_v4(),
            retailer_id: data.retailer_id,
            name: data.name,
            start_date: data.start_date,
            end_date: data.end_date,
            discount_percentage: data.discount_percentage,
            products_included: data.products_included,
            banner_image_url: data.banner_image_url,
            status: data.status,
            visibility_level: data.visibility_level,
            created_at: Utc::now(),
        };
        self.tables.write().await.campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn update(&self, id: Uuid, data: &UpdateCampaign) -> AppResult<Option<Campaign>> {
        let mut tables = self.tables.write().await;
        Ok(tables.campaigns.iter_mut().find(|c| c.id == id).map(|c| {
            data.apply_to(c);
            c.clone()
        }))
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn list_for(&self, recipient: Identity) -> AppResult<Vec<Notification>> {
        let tables = self.tables.read().await;
        let rows = tables
            .notifications
            .iter()
            .filter(|n| n.recipient() == recipient);
        Ok(newest_first(rows.cloned(), |n| n.created_at))
    }

    async fn create(&self, data: CreateNotification) -> AppResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: data.recipient.user_id,
            user_type: data.recipient.user_type,
            kind: data.kind,
            title: data.title,
            message: data.message,
            is_read: false,
            related_id: data.related_id,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .notifications
            .push(notification.clone());
        Ok(notification)
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let mut tables = self.tables.write().await;
        Ok(tables.notifications.iter_mut().find(|n| n.id == id).map(|n| {
            n.is_read = true;
            n.clone()
        }))
    }
}

#[async_trait]
impl NegotiationStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Negotiation>> {
        let tables = self.tables.read().await;
        Ok(tables.negotiations.iter().find(|n| n.id == id).cloned())
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Negotiation>> {
        let tables = self.tables.read().await;
        let rows = tables
            .negotiations
            .iter()
            .filter(|n| n.customer_id == customer_id);
        Ok(newest_first(rows.cloned(), |n| n.created_at))
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Negotiation>> {
        let tables = self.tables.read().await;
        let rows = tables
            .negotiations
            .iter()
            .filter(|n| n.retailer_id == retailer_id);
        Ok(newest_first(rows.cloned(), |n| n.created_at))
    }

    async fn create(&self, data: CreateNegotiation) -> AppResult<Negotiation> {
        let negotiation = Negotiation {
            id: Uuid::new_v4(),
            customer_id: data.customer_id,
            retailer_id: data.retailer_id,
            product_id: data.product_id,
            status: NegotiationStatus::Active,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .negotiations
            .push(negotiation.clone());
        Ok(negotiation)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: NegotiationStatus,
    ) -> AppResult<Option<Negotiation>> {
        let mut tables = self.tables.write().await;
        Ok(tables.negotiations.iter_mut().find(|n| n.id == id).map(|n| {
            n.status = status;
            n.clone()
        }))
    }

    async fn messages(&self, negotiation_id: Uuid) -> AppResult<Vec<NegotiationMessage>> {
        let tables = self.tables.read().await;
        Ok(tables
            .negotiation_messages
            .iter()
            .filter(|m| m.negotiation_id == negotiation_id)
            .cloned()
            .collect())
    }

    async fn add_message(&self, data: CreateNegotiationMessage) -> AppResult<NegotiationMessage> {
        let mut tables = self.tables.write().await;
        let message = NegotiationMessage {
            id: Uuid::new_v4(),
            negotiation_id: data.negotiation_id,
            sender_id: data.sender_id,
            sender_type: data.sender_type,
            message: data.message,
            offer_price: data.offer_price,
            created_at: Utc::now(),
        };
        if message.offer_price.is_some() {
            if let Some(n) = tables
                .negotiations
                .iter_mut()
                .find(|n| n.id == message.negotiation_id)
            {
                n.status = NegotiationStatus::Pending;
            }
        }
        tables.negotiation_messages.push(message.clone());
        Ok(message)
    }
}

#[async_trait]
impl RoomDesignStore for MemoryStore {
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<RoomDesign>> {
        let tables = self.tables.read().await;
        let rows = tables
            .room_designs
            .iter()
            .filter(|d| d.customer_id == customer_id);
        Ok(newest_first(rows.cloned(), |d| d.created_at))
    }

    async fn create_many(&self, designs: Vec<CreateRoomDesign>) -> AppResult<Vec<RoomDesign>> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created: Vec<RoomDesign> = designs
            .into_iter()
            .map(|d| RoomDesign {
                id: Uuid::new_v4(),
                customer_id: d.customer_id,
                product_id: d.product_id,
                room_type: d.room_type,
                theme: d.theme,
                style: d.style,
                placement_type: d.placement_type,
                image_url: d.image_url,
                saved: false,
                created_at: now,
            })
            .collect();
        tables.room_designs.extend(created.iter().cloned());
        Ok(created)
    }
}
