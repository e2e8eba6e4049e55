use axum::{
    Json, Router,
    extract::{Path, State},
    response::Redirect,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::images::{ClearResult, GalleryList},
    error::AppResult,
    response::ApiResponse,
    services::image_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gallery).delete(clear_images))
        .route("/{id}", get(get_image))
}

#[utoipa::path(
    get,
    path = "/api/images",
    responses(
        (status = 200, description = "Gallery of product images and unassociated uploads", body = ApiResponse<GalleryList>),
    ),
    tag = "Images"
)]
pub async fn list_gallery(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<GalleryList>>> {
    let resp = image_service::list_gallery(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/images/{id}",
    params(
        ("id" = Uuid, Path, description = "Image ID"),
    ),
    responses(
        (status = 307, description = "Redirect to the stored file"),
        (status = 404, description = "Image not found"),
    ),
    tag = "Images"
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    let location = image_service::image_location(&state, id).await?;
    Ok(Redirect::temporary(&location))
}

#[utoipa::path(
    delete,
    path = "/api/images",
    responses(
        (status = 200, description = "Delete image records no product references", body = ApiResponse<ClearResult>),
    ),
    tag = "Images"
)]
pub async fn clear_images(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ClearResult>>> {
    let resp = image_service::clear_images(&state).await?;
    Ok(Json(resp))
}
