use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::{NewProductUpload, ProductList, UploadResponse},
    error::{AppError, AppResult},
    models::Product,
    response::ApiResponse,
    routes::params::Pagination,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(upload_product).get(list_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    responses(
        (status = 200, description = "Product created from upload", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Invalid upload"),
    ),
    tag = "Products"
)]
pub async fn upload_product(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    let mut upload = NewProductUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("invalid multipart payload".to_string()))?
    {
        match field.name() {
            Some("file") => {
                upload.file_name = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::Validation("invalid multipart payload".to_string()))?;
                upload.file_bytes = Some(bytes.to_vec());
            }
            Some("product_name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::Validation("invalid multipart payload".to_string()))?;
                upload.product_name = Some(text);
            }
            Some("initial_stock_count") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::Validation("invalid multipart payload".to_string()))?;
                upload.initial_stock_count = Some(text);
            }
            _ => {}
        }
    }

    let resp = product_service::create_product(&state, upload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}
