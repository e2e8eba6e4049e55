use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{
        OrderConfirmation, OrderPage, OrderWithMovements, PlaceOrderRequest, RecentOrderList,
    },
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(place_order).get(recent_orders))
        .route("/page", get(order_page))
        .route("/{id}", get(get_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order created", body = ApiResponse<OrderConfirmation>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Insufficient stock"),
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderConfirmation>>> {
    let resp = order_service::place_order(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Ten most recent orders", body = ApiResponse<RecentOrderList>),
    ),
    tag = "Orders"
)]
pub async fn recent_orders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RecentOrderList>>> {
    let resp = order_service::recent_orders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Order with its stock movements", body = ApiResponse<OrderWithMovements>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithMovements>>> {
    let resp = order_service::get_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/page",
    responses(
        (status = 200, description = "Catalog plus recent orders", body = ApiResponse<OrderPage>),
    ),
    tag = "Orders"
)]
pub async fn order_page(State(state): State<AppState>) -> AppResult<Json<ApiResponse<OrderPage>>> {
    let resp = order_service::order_page(&state).await?;
    Ok(Json(resp))
}
