//! In-memory implementation of every store trait.
//!
//! All tables sit behind one `RwLock`, so a method that holds the write
//! guard for its whole body is atomic in the same way a PostgreSQL
//! transaction is. Order placement, bid acceptance and offer messages rely
//! on that.

mod account;
mod auction;
mod commerce;
mod engagement;

use tokio::sync::RwLock;

use atelier_entity::auction::{Auction, Bid};
use atelier_entity::campaign::Campaign;
use atelier_entity::cart::CartItem;
use atelier_entity::negotiation::{Negotiation, NegotiationMessage};
use atelier_entity::notification::Notification;
use atelier_entity::order::{Order, OrderItem};
use atelier_entity::product::Product;
use atelier_entity::review::Review;
use atelier_entity::room_design::RoomDesign;
use atelier_entity::user::{Customer, Retailer};

/// Rows kept in insertion order.
#[derive(Debug, Default)]
struct Tables {
    retailers: Vec<Retailer>,
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    cart_items: Vec<CartItem>,
    auctions: Vec<Auction>,
    bids: Vec<Bid>,
    reviews: Vec<Review>,
    campaigns: Vec<Campaign>,
    notifications: Vec<Notification>,
    negotiations: Vec<Negotiation>,
    negotiation_messages: Vec<NegotiationMessage>,
    room_designs: Vec<RoomDesign>,
}

/// Process-local store used by tests and local demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first by `key`, ties broken by reverse insertion order.
fn newest_first<T, K: Ord>(
    rows: impl DoubleEndedIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Vec<T> {
    let mut out: Vec<T> = rows.rev().collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}
