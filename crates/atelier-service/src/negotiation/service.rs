//! Negotiation threads, messages and decisions.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::{NegotiationStore, ProductStore};
use atelier_entity::money;
use atelier_entity::negotiation::{
    CreateNegotiation, CreateNegotiationMessage, Negotiation, NegotiationMessage,
    NegotiationStatus,
};
use atelier_entity::notification::{CreateNotification, NotificationKind};
use atelier_entity::user::{Identity, UserType};
use atelier_realtime::{NotificationDispatcher, OutboundMessage};

use crate::context::RequestContext;

/// Listing filter for `GET /api/negotiations`.
#[derive(Debug, Clone, Default)]
pub struct NegotiationQuery {
    pub customer_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
}

/// Negotiation threads. The sender of every message is the caller; only
/// the thread's customer and retailer may read or write it.
#[derive(Clone)]
pub struct NegotiationService {
    negotiations: Arc<dyn NegotiationStore>,
    products: Arc<dyn ProductStore>,
    dispatcher: NotificationDispatcher,
}

impl NegotiationService {
    /// Creates a new negotiation service.
    pub fn new(
        negotiations: Arc<dyn NegotiationStore>,
        products: Arc<dyn ProductStore>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            negotiations,
            products,
            dispatcher,
        }
    }

    /// Opens a thread with the retailer selling `product_id`.
    pub async fn open(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        retailer_id: Option<Uuid>,
    ) -> Result<Negotiation, AppError> {
        let customer_id = ctx.require_customer()?;
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        if retailer_id.is_some_and(|r| r != product.retailer_id) {
            return Err(AppError::validation("Product does not belong to this retailer"));
        }

        let negotiation = self
            .negotiations
            .create(CreateNegotiation {
                customer_id,
                retailer_id: product.retailer_id,
                product_id,
            })
            .await?;

        info!(
            negotiation_id = %negotiation.id,
            customer_id = %customer_id,
            retailer_id = %negotiation.retailer_id,
            "Negotiation opened"
        );

        self.dispatcher
            .notify(
                CreateNotification::new(
                    Identity::retailer(negotiation.retailer_id),
                    NotificationKind::Negotiation,
                    "New Negotiation Request",
                    "Customer interested in negotiating",
                )
                .related_to(negotiation.id),
            )
            .await;

        Ok(negotiation)
    }

    /// Lists threads of a customer or retailer; the caller must be that user.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: NegotiationQuery,
    ) -> Result<Vec<Negotiation>, AppError> {
        let identity = match (query.customer_id, query.retailer_id) {
            (Some(customer_id), _) => Identity::customer(customer_id),
            (None, Some(retailer_id)) => Identity::retailer(retailer_id),
            (None, None) => ctx.identity,
        };
        ctx.ensure_is(identity)?;

        match identity.user_type {
            UserType::Customer => self.negotiations.list_by_customer(identity.user_id).await,
            UserType::Retailer => self.negotiations.list_by_retailer(identity.user_id).await,
        }
    }

    /// Fetches one thread.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Negotiation, AppError> {
        self.find_for(ctx, id).await
    }

    /// Messages of a thread, oldest first.
    pub async fn messages(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<NegotiationMessage>, AppError> {
        self.find_for(ctx, id).await?;
        self.negotiations.messages(id).await
    }

    /// Appends a message from the caller.
    ///
    /// An offer price moves the thread to `pending` in the same write. The
    /// counterparty gets a notification and a `new_message` push.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        message: String,
        offer_price: Option<Decimal>,
    ) -> Result<NegotiationMessage, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::validation("Message cannot be empty"));
        }
        if offer_price.is_some_and(|p| p.is_sign_negative()) {
            return Err(AppError::validation("Offer price cannot be negative"));
        }
        let negotiation = self.find_for(ctx, id).await?;

        let sent = self
            .negotiations
            .add_message(CreateNegotiationMessage {
                negotiation_id: id,
                sender_id: ctx.user_id(),
                sender_type: ctx.user_type(),
                message,
                offer_price: offer_price.map(money::normalize),
            })
            .await?;

        info!(
            negotiation_id = %id,
            sender = %ctx.identity,
            offer = sent.offer_price.is_some(),
            "Negotiation message sent"
        );

        let counterparty = negotiation.counterparty_of(ctx.user_type());
        self.dispatcher
            .notify_and_push(
                CreateNotification::new(
                    counterparty,
                    NotificationKind::Negotiation,
                    "New Message",
                    "New message in negotiation",
                )
                .related_to(id),
                &OutboundMessage::NewMessage {
                    negotiation_id: id,
                    message: sent.clone(),
                },
            )
            .await;

        Ok(sent)
    }

    /// Sets the thread status. Accepting or rejecting notifies the customer.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: NegotiationStatus,
    ) -> Result<Negotiation, AppError> {
        self.find_for(ctx, id).await?;

        let updated = self
            .negotiations
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Negotiation not found"))?;

        info!(negotiation_id = %id, status = %status, by = %ctx.identity, "Negotiation status changed");

        if status.is_decision() {
            self.dispatcher
                .notify(
                    CreateNotification::new(
                        Identity::customer(updated.customer_id),
                        NotificationKind::Negotiation,
                        format!("Negotiation {status}"),
                        format!("Your negotiation was {status}"),
                    )
                    .related_to(id),
                )
                .await;
        }

        Ok(updated)
    }

    async fn find_for(&self, ctx: &RequestContext, id: Uuid) -> Result<Negotiation, AppError> {
        let negotiation = self
            .negotiations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Negotiation not found"))?;
        if !negotiation.is_participant(&ctx.identity) {
            return Err(AppError::authorization("Not a participant in this negotiation"));
        }
        Ok(negotiation)
    }
}

#[cfg(test)]
mod tests {
    use atelier_core::ErrorKind;
    use atelier_database::store::NotificationStore;

    use super::*;
    use crate::testing::Fixture;

    async fn thread(fx: &Fixture) -> (Negotiation, Uuid, Uuid) {
        let customer = Uuid::new_v4();
        let retailer = Uuid::new_v4();
        let product = fx.product(retailer, "Marble Table", "1200").await;
        let negotiation = fx
            .negotiations()
            .open(&fx.customer(customer), product.id, None)
            .await
            .unwrap();
        (negotiation, customer, retailer)
    }

    #[tokio::test]
    async fn test_open_notifies_retailer() {
        let fx = Fixture::new();
        let (negotiation, _, retailer) = thread(&fx).await;

        assert_eq!(negotiation.status, NegotiationStatus::Active);
        assert_eq!(negotiation.retailer_id, retailer);
        let notes = NotificationStore::list_for(fx.memory.as_ref(), Identity::retailer(retailer))
            .await
            .unwrap();
        assert_eq!(notes[0].title, "New Negotiation Request");
    }

    #[tokio::test]
    async fn test_offer_sets_pending_and_reaches_counterparty() {
        let fx = Fixture::new();
        let (negotiation, customer, retailer) = thread(&fx).await;
        let (handle, mut rx) = fx.registry.connect();
        fx.registry.register(&handle, Identity::retailer(retailer));
        let service = fx.negotiations();

        let sent = service
            .send_message(
                &fx.customer(customer),
                negotiation.id,
                "Would you take 1000?".to_string(),
                Some("1000".parse().unwrap()),
            )
            .await
            .unwrap();

        assert_eq!(sent.sender_id, customer);
        assert_eq!(sent.sender_type, UserType::Customer);
        let current = service.get(&fx.customer(customer), negotiation.id).await.unwrap();
        assert_eq!(current.status, NegotiationStatus::Pending);

        let frame: serde_json::Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(frame["type"], "new_message");
        assert_eq!(frame["negotiationId"], negotiation.id.to_string());
        assert_eq!(frame["message"]["offerPrice"], "1000.00");
    }

    #[tokio::test]
    async fn test_plain_message_keeps_status() {
        let fx = Fixture::new();
        let (negotiation, _, retailer) = thread(&fx).await;
        let service = fx.negotiations();

        service
            .send_message(&fx.retailer(retailer), negotiation.id, "Hello".to_string(), None)
            .await
            .unwrap();

        let messages = service
            .messages(&fx.retailer(retailer), negotiation.id)
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_type, UserType::Retailer);
        assert_eq!(
            service.get(&fx.retailer(retailer), negotiation.id).await.unwrap().status,
            NegotiationStatus::Active
        );
    }

    #[tokio::test]
    async fn test_outsider_cannot_post() {
        let fx = Fixture::new();
        let (negotiation, _, _) = thread(&fx).await;

        let err = fx
            .negotiations()
            .send_message(
                &fx.customer(Uuid::new_v4()),
                negotiation.id,
                "Hi".to_string(),
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_accept_notifies_customer() {
        let fx = Fixture::new();
        let (negotiation, customer, retailer) = thread(&fx).await;

        let updated = fx
            .negotiations()
            .update_status(&fx.retailer(retailer), negotiation.id, NegotiationStatus::Accepted)
            .await
            .unwrap();

        assert_eq!(updated.status, NegotiationStatus::Accepted);
        let notes = NotificationStore::list_for(fx.memory.as_ref(), Identity::customer(customer))
            .await
            .unwrap();
        assert_eq!(notes[0].title, "Negotiation accepted");
        assert_eq!(notes[0].message, "Your negotiation was accepted");
    }
}
