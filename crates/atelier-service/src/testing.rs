//! Shared test fixture: in-memory stores and a live registry.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use atelier_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use atelier_core::config::{AuthConfig, RealtimeConfig};
use atelier_database::memory::MemoryStore;
use atelier_database::store::{CustomerStore, ProductStore, Stores};
use atelier_entity::product::{CreateProduct, PlacementType, Product};
use atelier_entity::user::{CreateCustomer, Customer, Identity};
use atelier_realtime::{ConnectionRegistry, NotificationDispatcher};

use crate::account::AccountService;
use crate::auction::AuctionService;
use crate::cart::CartService;
use crate::catalog::{CampaignService, ProductService, ReviewService};
use crate::context::RequestContext;
use crate::negotiation::NegotiationService;
use crate::notification::NotificationService;
use crate::order::OrderService;
use crate::room_design::{ImageGenerator, RoomDesignService};

pub(crate) struct Fixture {
    pub memory: Arc<MemoryStore>,
    pub stores: Stores,
    pub registry: Arc<ConnectionRegistry>,
    pub dispatcher: NotificationDispatcher,
    auth: AuthConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let auth = AuthConfig {
            jwt_secret: "fixture-secret-0123456789".to_string(),
            ..AuthConfig::default()
        };
        let memory = Arc::new(MemoryStore::new());
        let stores = Stores::memory(memory.clone());
        let registry = Arc::new(ConnectionRegistry::new(
            RealtimeConfig::default(),
            JwtDecoder::new(&auth),
        ));
        let dispatcher =
            NotificationDispatcher::new(stores.notifications.clone(), registry.clone());
        Self {
            memory,
            stores,
            registry,
            dispatcher,
            auth,
        }
    }

    pub fn customer(&self, id: Uuid) -> RequestContext {
        RequestContext::new(Identity::customer(id), format!("{id}@customer.test"))
    }

    pub fn retailer(&self, id: Uuid) -> RequestContext {
        RequestContext::new(Identity::retailer(id), format!("{id}@retailer.test"))
    }

    pub fn decoder(&self) -> JwtDecoder {
        JwtDecoder::new(&self.auth)
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(
            self.stores.retailers.clone(),
            self.stores.customers.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&self.auth)),
        )
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.stores.orders.clone(), self.dispatcher.clone())
    }

    pub fn auctions(&self) -> AuctionService {
        AuctionService::new(
            self.stores.auctions.clone(),
            self.stores.products.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn negotiations(&self) -> NegotiationService {
        NegotiationService::new(
            self.stores.negotiations.clone(),
            self.stores.products.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn notifications(&self) -> NotificationService {
        NotificationService::new(self.stores.notifications.clone())
    }

    pub fn products(&self) -> ProductService {
        ProductService::new(self.stores.products.clone())
    }

    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(
            self.stores.reviews.clone(),
            self.stores.products.clone(),
            self.stores.customers.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn campaigns(&self) -> CampaignService {
        CampaignService::new(self.stores.campaigns.clone())
    }

    pub fn carts(&self) -> CartService {
        CartService::new(self.stores.cart.clone(), self.stores.products.clone())
    }

    pub fn room_designs(&self, generator: Arc<dyn ImageGenerator>) -> RoomDesignService {
        RoomDesignService::new(
            self.stores.room_designs.clone(),
            self.stores.products.clone(),
            generator,
        )
    }

    /// Lists a floor product with five units in stock.
    pub async fn product(&self, retailer_id: Uuid, name: &str, price: &str) -> Product {
        ProductStore::create(
            self.memory.as_ref(),
            CreateProduct {
                retailer_id,
                name: name.to_string(),
                description: None,
                category: "Furniture".to_string(),
                price: Decimal::from_str(price).unwrap(),
                stock_quantity: 5,
                image_url: None,
                specifications: None,
                placement: None,
                placement_type: PlacementType::Floor,
            },
        )
        .await
        .unwrap()
    }

    pub async fn customer_account(&self, name: &str) -> Customer {
        CustomerStore::create(
            self.memory.as_ref(),
            CreateCustomer {
                name: name.to_string(),
                email: format!("{}@customer.test", Uuid::new_v4()),
                password_hash: "not-a-real-hash".to_string(),
                contact_number: None,
                address: None,
            },
        )
        .await
        .unwrap()
    }
}
