use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryEntry {
    pub image_url: String,
    pub file_path: String,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub stock_count: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct GalleryList {
    #[schema(value_type = Vec<GalleryEntry>)]
    pub items: Vec<GalleryEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearResult {
    pub deleted: u64,
}
