//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use atelier_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use atelier_core::config::AppConfig;
use atelier_database::{DatabasePool, Stores};
use atelier_realtime::{ConnectionRegistry, NotificationDispatcher};
use atelier_service::{
    AccountService, AnalyticsService, AuctionService, CampaignService, CartService,
    ImageGenerator, NegotiationService, NotificationService, OrderService, ProductService,
    ReviewService, RoomDesignService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,
    /// Process start, for the uptime in health responses.
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool. `None` when running over the in-memory store.
    pub database: Option<DatabasePool>,
    pub jwt_decoder: Arc<JwtDecoder>,
    pub registry: Arc<ConnectionRegistry>,

    // ── Services ─────────────────────────────────────────────
    pub accounts: Arc<AccountService>,
    pub products: Arc<ProductService>,
    pub cart: Arc<CartService>,
    pub orders: Arc<OrderService>,
    pub auctions: Arc<AuctionService>,
    pub negotiations: Arc<NegotiationService>,
    pub reviews: Arc<ReviewService>,
    pub campaigns: Arc<CampaignService>,
    pub notifications: Arc<NotificationService>,
    pub analytics: Arc<AnalyticsService>,
    pub room_designs: Arc<RoomDesignService>,
}

impl AppState {
    /// Wires every service over one set of stores.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        generator: Arc<dyn ImageGenerator>,
        database: Option<DatabasePool>,
    ) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());
        let registry = Arc::new(ConnectionRegistry::new(
            config.realtime.clone(),
            JwtDecoder::new(&config.auth),
        ));
        let dispatcher =
            NotificationDispatcher::new(Arc::clone(&stores.notifications), Arc::clone(&registry));

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            started_at: Instant::now(),
            database,
            accounts: Arc::new(AccountService::new(
                Arc::clone(&stores.retailers),
                Arc::clone(&stores.customers),
                password_hasher,
                jwt_encoder,
            )),
            products: Arc::new(ProductService::new(Arc::clone(&stores.products))),
            cart: Arc::new(CartService::new(
                Arc::clone(&stores.cart),
                Arc::clone(&stores.products),
            )),
            orders: Arc::new(OrderService::new(
                Arc::clone(&stores.orders),
                dispatcher.clone(),
            )),
            auctions: Arc::new(AuctionService::new(
                Arc::clone(&stores.auctions),
                Arc::clone(&stores.products),
                dispatcher.clone(),
            )),
            negotiations: Arc::new(NegotiationService::new(
                Arc::clone(&stores.negotiations),
                Arc::clone(&stores.products),
                dispatcher.clone(),
            )),
            reviews: Arc::new(ReviewService::new(
                Arc::clone(&stores.reviews),
                Arc::clone(&stores.products),
                Arc::clone(&stores.customers),
                dispatcher,
            )),
            campaigns: Arc::new(CampaignService::new(Arc::clone(&stores.campaigns))),
            notifications: Arc::new(NotificationService::new(Arc::clone(&stores.notifications))),
            analytics: Arc::new(AnalyticsService::new(
                Arc::clone(&stores.orders),
                Arc::clone(&stores.products),
            )),
            room_designs: Arc::new(RoomDesignService::new(
                Arc::clone(&stores.room_designs),
                Arc::clone(&stores.products),
                generator,
            )),
            registry,
            config: Arc::new(config),
        }
    }
}
