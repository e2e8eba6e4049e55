use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSummary {
    pub product_id: Uuid,
    pub product_name: String,
    pub stock_count: i32,
    pub image_url: Option<String>,
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductSummary>)]
    pub items: Vec<ProductSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub filename: String,
    pub img_url: String,
    pub product: Product,
}

/// Multipart upload fields as received; validated by the product service.
#[derive(Debug, Default)]
pub struct NewProductUpload {
    pub file_name: Option<String>,
    pub file_bytes: Option<Vec<u8>>,
    pub product_name: Option<String>,
    pub initial_stock_count: Option<String>,
}
