use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::products::ProductSummary,
    models::{Order, StockMovement},
};

/// Raw order form fields. Values arrive as strings and are validated before
/// any datastore access; a missing quantity defaults to "1".
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub product_id: Option<String>,
    pub customer_name: Option<String>,
    pub order_quantity: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub product_name: String,
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentOrder {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub order_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub total: i64,
    pub customer_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RecentOrderList {
    #[schema(value_type = Vec<RecentOrder>)]
    pub items: Vec<RecentOrder>,
}

/// Everything the order page needs: the catalog plus the latest orders.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPage {
    pub products: Vec<ProductSummary>,
    pub orders: Vec<RecentOrder>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithMovements {
    pub order: Order,
    pub movements: Vec<StockMovement>,
}
