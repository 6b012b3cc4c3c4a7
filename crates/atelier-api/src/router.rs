//! Route definitions for the Atelier HTTP API.
//!
//! All REST routes are organized by domain and mounted under `/api`; the
//! WebSocket upgrade lives at `/ws`.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(product_routes())
        .merge(cart_routes())
        .merge(order_routes())
        .merge(auction_routes())
        .merge(negotiation_routes())
        .merge(marketing_routes())
        .merge(notification_routes())
        .merge(analytics_routes())
        .merge(room_design_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .with_state(state)
}

/// Registration, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/customer/register", post(handlers::auth::register_customer))
        .route("/auth/retailer/register", post(handlers::auth::register_retailer))
        .route("/auth/customer/login", post(handlers::auth::login_customer))
        .route("/auth/retailer/login", post(handlers::auth::login_retailer))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Self-service profiles
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers/{id}",
            get(handlers::account::get_customer).put(handlers::account::update_customer),
        )
        .route(
            "/retailers/{id}",
            get(handlers::account::get_retailer).put(handlers::account::update_retailer),
        )
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
}

fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cart",
            get(handlers::cart::list_cart)
                .post(handlers::cart::add_to_cart)
                .delete(handlers::cart::clear_cart),
        )
        .route(
            "/cart/{id}",
            put(handlers::cart::update_cart_item).delete(handlers::cart::remove_cart_item),
        )
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            get(handlers::order::list_orders).post(handlers::order::create_order),
        )
        .route(
            "/orders/{id}",
            get(handlers::order::get_order).put(handlers::order::update_order),
        )
}

/// Auctions, bids and closing
fn auction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auctions",
            get(handlers::auction::list_auctions).post(handlers::auction::create_auction),
        )
        .route("/auctions/{id}", get(handlers::auction::get_auction))
        .route("/auctions/{id}/bids", post(handlers::auction::place_bid))
        .route("/auctions/{id}/close", post(handlers::auction::close_auction))
}

fn negotiation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/negotiations",
            get(handlers::negotiation::list_negotiations)
                .post(handlers::negotiation::open_negotiation),
        )
        .route(
            "/negotiations/{id}",
            get(handlers::negotiation::get_negotiation)
                .put(handlers::negotiation::update_negotiation),
        )
        .route(
            "/negotiations/{id}/messages",
            get(handlers::negotiation::list_messages).post(handlers::negotiation::send_message),
        )
}

/// Reviews and campaigns
fn marketing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews",
            get(handlers::review::list_reviews).post(handlers::review::create_review),
        )
        .route("/reviews/{id}", put(handlers::review::update_review))
        .route(
            "/campaigns",
            get(handlers::campaign::list_campaigns).post(handlers::campaign::create_campaign),
        )
        .route("/campaigns/{id}", put(handlers::campaign::update_campaign))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list_notifications))
        .route("/notifications/{id}/read", put(handlers::notification::mark_read))
}

fn analytics_routes() -> Router<AppState> {
    Router::new().route(
        "/analytics/retailer/{retailer_id}",
        get(handlers::analytics::retailer_analytics),
    )
}

fn room_design_routes() -> Router<AppState> {
    Router::new().route(
        "/room-designs",
        get(handlers::room_design::list_room_designs)
            .post(handlers::room_design::create_room_design),
    )
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
