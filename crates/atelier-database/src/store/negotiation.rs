//! Negotiation store.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::negotiation::{
    CreateNegotiation, CreateNegotiationMessage, Negotiation, NegotiationMessage,
    NegotiationStatus,
};

#[async_trait]
pub trait NegotiationStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Negotiation>>;
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Negotiation>>;
    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Negotiation>>;
    async fn create(&self, data: CreateNegotiation) -> AppResult<Negotiation>;
    async fn update_status(
        &self,
        id: Uuid,
        status: NegotiationStatus,
    ) -> AppResult<Option<Negotiation>>;
    /// Messages oldest first.
    async fn messages(&self, negotiation_id: Uuid) -> AppResult<Vec<NegotiationMessage>>;

    /// Append a message. A message carrying an offer price also moves the
    /// negotiation to `pending` in the same unit of work.
    async fn add_message(&self, data: CreateNegotiationMessage) -> AppResult<NegotiationMessage>;
}
