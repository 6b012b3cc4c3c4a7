//! Product reviews and retailer responses.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::{CustomerStore, ProductStore, ReviewStore};
use atelier_entity::notification::{CreateNotification, NotificationKind};
use atelier_entity::review::{CreateReview, Review, UpdateReview};
use atelier_entity::user::Identity;
use atelier_realtime::NotificationDispatcher;

use crate::context::RequestContext;

/// Listing filter for `GET /api/reviews`. One of the two is required.
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    pub product_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
    products: Arc<dyn ProductStore>,
    customers: Arc<dyn CustomerStore>,
    dispatcher: NotificationDispatcher,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        reviews: Arc<dyn ReviewStore>,
        products: Arc<dyn ProductStore>,
        customers: Arc<dyn CustomerStore>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            reviews,
            products,
            customers,
            dispatcher,
        }
    }

    /// Lists reviews of a product or of a retailer, newest first.
    pub async fn list(&self, query: ReviewQuery) -> Result<Vec<Review>, AppError> {
        match (query.product_id, query.retailer_id) {
            (Some(product_id), _) => self.reviews.list_by_product(product_id).await,
            (None, Some(retailer_id)) => self.reviews.list_by_retailer(retailer_id).await,
            (None, None) => Err(AppError::validation("productId or retailerId is required")),
        }
    }

    /// Reviews a product as the calling customer and notifies its retailer.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, AppError> {
        let customer_id = ctx.require_customer()?;
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;

        let review = self
            .reviews
            .create(CreateReview {
                customer_id,
                customer_name: customer.name,
                retailer_id: product.retailer_id,
                product_id,
                product_name: product.name,
                rating,
                comment,
            })
            .await?;

        info!(review_id = %review.id, product_id = %product_id, rating, "Review submitted");

        self.dispatcher
            .notify(
                CreateNotification::new(
                    Identity::retailer(review.retailer_id),
                    NotificationKind::Review,
                    "New Review Received",
                    format!("{rating} star review for your product"),
                )
                .related_to(review.id),
            )
            .await;

        Ok(review)
    }

    /// Responds to or moderates a review of the caller's product.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateReview,
    ) -> Result<Review, AppError> {
        if data.response.is_none() && data.status.is_none() {
            return Err(AppError::validation("Response or status is required"));
        }
        let review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))?;
        if !ctx.is_retailer(review.retailer_id) {
            return Err(AppError::authorization("Only the retailer can update this review"));
        }

        let updated = self
            .reviews
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))?;
        info!(review_id = %id, "Review updated");
        Ok(updated)
    }
}
