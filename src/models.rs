use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub image_id: Option<Uuid>,
    pub stock_count: i32,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Monetary amounts are integer minor units (cents).
#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub total: i64,
    pub tax: i64,
    pub pretax_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Ledger entry recording a quantity of a product removed from inventory.
#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub order_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ImageRecord {
    pub id: Uuid,
    pub file_path: String,
    pub product_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
