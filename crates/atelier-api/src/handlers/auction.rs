//! Auction and bid handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::auction::{Auction, AuctionWithBids, Bid};
use atelier_service::AuctionQuery;

use crate::dto::request::{
    AuctionListQuery, CloseAuctionRequest, CreateAuctionRequest, PlaceBidRequest,
};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/auctions?customerId&retailerId&active
pub async fn list_auctions(
    State(state): State<AppState>,
    Query(query): Query<AuctionListQuery>,
) -> Result<Json<Vec<AuctionWithBids>>, AppError> {
    let query = AuctionQuery {
        customer_id: query.customer_id,
        retailer_id: query.retailer_id,
        active: query.active,
    };
    Ok(Json(state.auctions.list(query).await?))
}

/// GET /api/auctions/{id}
pub async fn get_auction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuctionWithBids>, AppError> {
    Ok(Json(state.auctions.get(id).await?))
}

/// POST /api/auctions
pub async fn create_auction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateAuctionRequest>,
) -> Result<(StatusCode, Json<Auction>), AppError> {
    let auction = state.auctions.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(auction)))
}

/// POST /api/auctions/{id}/bids
pub async fn place_bid(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<PlaceBidRequest>,
) -> Result<(StatusCode, Json<Bid>), AppError> {
    let bid = state.auctions.place_bid(&auth, id, req.bid_amount).await?;
    Ok((StatusCode::CREATED, Json(bid)))
}

/// POST /api/auctions/{id}/close
pub async fn close_auction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CloseAuctionRequest>,
) -> Result<Json<Auction>, AppError> {
    Ok(Json(state.auctions.close(&auth, id, req.winner_id).await?))
}
