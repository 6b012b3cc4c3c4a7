//! Request DTOs with validation.
//!
//! Required-field checks that carry domain wording live in the services;
//! these rules cover shape and bounds.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use atelier_entity::campaign::{CampaignStatus, VisibilityLevel};
use atelier_entity::negotiation::NegotiationStatus;
use atelier_entity::order::{OrderStatus, PaymentStatus};
use atelier_entity::product::PlacementType;
use atelier_entity::review::ReviewStatus;
use atelier_entity::user::UserType;
use atelier_service::{
    DesignBrief, NewAuction, NewCampaign, NewCustomer, NewProduct, NewRetailer, OrderLine,
    PlaceOrder,
};

// ── Auth ─────────────────────────────────────────────────────

/// `POST /api/auth/customer/register`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRegisterRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 320))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

impl From<CustomerRegisterRequest> for NewCustomer {
    fn from(req: CustomerRegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            contact_number: req.contact_number,
            address: req.address,
        }
    }
}

/// `POST /api/auth/retailer/register`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RetailerRegisterRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub business_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub owner_name: String,
    #[serde(default)]
    #[validate(length(max = 320))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub address: String,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
}

impl From<RetailerRegisterRequest> for NewRetailer {
    fn from(req: RetailerRegisterRequest) -> Self {
        Self {
            business_name: req.business_name,
            owner_name: req.owner_name,
            email: req.email,
            password: req.password,
            contact_number: req.contact_number,
            address: req.address,
            gst_number: req.gst_number,
            pan_number: req.pan_number,
        }
    }
}

/// `POST /api/auth/{customer,retailer}/login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ── Catalog ──────────────────────────────────────────────────

/// `POST /api/products`. Any `retailerId` in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub specifications: Option<String>,
    pub placement: Option<String>,
    #[serde(default = "default_placement_type")]
    pub placement_type: PlacementType,
}

fn default_placement_type() -> PlacementType {
    PlacementType::Floor
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            category: req.category,
            price: req.price,
            stock_quantity: req.stock_quantity,
            image_url: req.image_url,
            specifications: req.specifications,
            placement: req.placement,
            placement_type: req.placement_type,
        }
    }
}

/// `GET /api/reviews`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListQuery {
    pub product_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
}

/// `POST /api/reviews`. The reviewer is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// `PUT /api/reviews/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(max = 2000))]
    pub response: Option<String>,
    pub status: Option<ReviewStatus>,
}

/// `GET /api/campaigns`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListQuery {
    pub retailer_id: Option<Uuid>,
    #[serde(default)]
    pub active: bool,
}

/// `POST /api/campaigns`. The owner is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 200, message = "Campaign name is required"))]
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub discount_percentage: Option<Decimal>,
    pub products_included: Option<serde_json::Value>,
    pub banner_image_url: Option<String>,
    pub status: Option<CampaignStatus>,
    pub visibility_level: Option<VisibilityLevel>,
}

impl From<CreateCampaignRequest> for NewCampaign {
    fn from(req: CreateCampaignRequest) -> Self {
        Self {
            name: req.name,
            start_date: req.start_date,
            end_date: req.end_date,
            discount_percentage: req.discount_percentage,
            products_included: req.products_included,
            banner_image_url: req.banner_image_url,
            status: req.status,
            visibility_level: req.visibility_level,
        }
    }
}

// ── Cart ─────────────────────────────────────────────────────

/// `?customerId=` on cart endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub customer_id: Option<Uuid>,
}

/// `POST /api/cart`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

/// `PUT /api/cart/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCartRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

// ── Orders ───────────────────────────────────────────────────

/// `POST /api/orders` body: `{ order, items }`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(nested)]
    pub order: OrderPayload,
    #[validate(nested)]
    pub items: Vec<OrderItemPayload>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub customer_id: Uuid,
    pub total_amount: Option<Decimal>,
    #[validate(length(max = 1000))]
    pub delivery_address: String,
    pub payment_status: Option<PaymentStatus>,
    pub order_status: Option<OrderStatus>,
    pub shipping_partner: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

/// One submitted line. A `subtotal` field, if sent, is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    pub retailer_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub price: Decimal,
}

impl CreateOrderRequest {
    /// Split into the service's order and line inputs.
    pub fn into_parts(self) -> (PlaceOrder, Vec<OrderLine>) {
        let order = self.order;
        let place = PlaceOrder {
            customer_id: order.customer_id,
            total_amount: order.total_amount,
            delivery_address: order.delivery_address,
            payment_status: order.payment_status,
            order_status: order.order_status,
            shipping_partner: order.shipping_partner,
            estimated_delivery_date: order.estimated_delivery_date,
            remarks: order.remarks,
        };
        let lines = self
            .items
            .into_iter()
            .map(|i| OrderLine {
                product_id: i.product_id,
                product_name: i.product_name,
                retailer_id: i.retailer_id,
                quantity: i.quantity,
                price: i.price,
            })
            .collect();
        (place, lines)
    }
}

/// `GET /api/orders`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub customer_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
}

// ── Auctions ─────────────────────────────────────────────────

/// `GET /api/auctions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionListQuery {
    pub customer_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
    #[serde(default)]
    pub active: bool,
}

/// `POST /api/auctions`. The owner is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuctionRequest {
    pub product_id: Uuid,
    pub retailer_id: Option<Uuid>,
    pub start_price: Decimal,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
}

impl From<CreateAuctionRequest> for NewAuction {
    fn from(req: CreateAuctionRequest) -> Self {
        Self {
            product_id: req.product_id,
            retailer_id: req.retailer_id,
            start_price: req.start_price,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// `POST /api/auctions/{id}/bids`. The bidder is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidRequest {
    pub bid_amount: Decimal,
}

/// `POST /api/auctions/{id}/close`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CloseAuctionRequest {
    pub winner_id: Uuid,
}

// ── Negotiations ─────────────────────────────────────────────

/// `GET /api/negotiations`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationListQuery {
    pub customer_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
}

/// `POST /api/negotiations`. The customer is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenNegotiationRequest {
    pub product_id: Uuid,
    pub retailer_id: Option<Uuid>,
}

/// `POST /api/negotiations/{id}/messages`. Sender fields in the body are
/// ignored; the sender is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(max = 4000))]
    pub message: String,
    pub offer_price: Option<Decimal>,
}

/// `PUT /api/negotiations/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNegotiationRequest {
    pub status: NegotiationStatus,
}

// ── Notifications ────────────────────────────────────────────

/// `GET /api/notifications?userId&userType`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListQuery {
    pub user_id: Option<Uuid>,
    pub user_type: Option<UserType>,
}

// ── Room designs ─────────────────────────────────────────────

/// `POST /api/room-designs`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomDesignRequest {
    #[serde(default)]
    pub product_ids: Vec<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Room type is required"))]
    pub room_type: String,
    #[validate(length(min = 1, max = 100, message = "Theme is required"))]
    pub theme: String,
    #[validate(length(min = 1, max = 100, message = "Style is required"))]
    pub style: String,
}

impl From<CreateRoomDesignRequest> for DesignBrief {
    fn from(req: CreateRoomDesignRequest) -> Self {
        Self {
            product_ids: req.product_ids,
            room_type: req.room_type,
            theme: req.theme,
            style: req.style,
        }
    }
}
