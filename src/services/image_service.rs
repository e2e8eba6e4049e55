use std::path::Path;

use uuid::Uuid;

use crate::{
    dto::images::{ClearResult, GalleryEntry, GalleryList},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

const ALLOWED_EXTENSIONS: [&str; 6] = ["txt", "pdf", "png", "jpg", "jpeg", "gif"];

pub fn image_url(file_path: &str) -> String {
    format!("/uploads/{file_path}")
}

pub fn allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Strips any path components and keeps a conservative character set, so the
/// stored name can never escape the upload directory.
pub fn sanitize_filename(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or("");
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .skip_while(|c| *c == '.')
        .collect()
}

pub async fn store_file(upload_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<(), AppError> {
    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(upload_dir.join(file_name), bytes).await?;
    Ok(())
}

/// Gallery listing: products joined to their image through the canonical key,
/// followed by images no product references.
pub async fn list_gallery(state: &AppState) -> AppResult<ApiResponse<GalleryList>> {
    let associated = sqlx::query_as::<_, AssociatedRow>(
        r#"
        SELECT p.id AS product_id, p.name AS product_name, p.stock_count, i.file_path
        FROM products p
        JOIN images i ON i.id = p.image_id
        ORDER BY p.created_at
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let unassociated = sqlx::query_as::<_, UnassociatedRow>(
        r#"
        SELECT i.file_path
        FROM images i
        WHERE NOT EXISTS (SELECT 1 FROM products p WHERE p.image_id = i.id)
        ORDER BY i.uploaded_at
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let mut items: Vec<GalleryEntry> = associated
        .into_iter()
        .map(|row| GalleryEntry {
            image_url: image_url(&row.file_path),
            file_path: row.file_path,
            product_id: Some(row.product_id),
            product_name: row.product_name,
            stock_count: row.stock_count,
        })
        .collect();

    items.extend(unassociated.into_iter().map(|row| GalleryEntry {
        image_url: image_url(&row.file_path),
        file_path: row.file_path,
        product_id: None,
        product_name: "Unassociated Image".to_string(),
        stock_count: 0,
    }));

    Ok(ApiResponse::success(
        "Gallery",
        GalleryList { items },
        Some(Meta::empty()),
    ))
}

/// Resolves an image id to the URL its file is served from.
pub async fn image_location(state: &AppState, id: Uuid) -> AppResult<String> {
    let row: Option<(String,)> = sqlx::query_as("SELECT file_path FROM images WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match row {
        Some((file_path,)) => Ok(image_url(&file_path)),
        None => Err(AppError::NotFound("image")),
    }
}

/// Deletes image metadata rows no product references. Files on disk are left
/// in place.
pub async fn clear_images(state: &AppState) -> AppResult<ApiResponse<ClearResult>> {
    let result = sqlx::query(
        "DELETE FROM images i WHERE NOT EXISTS (SELECT 1 FROM products p WHERE p.image_id = i.id)",
    )
    .execute(&state.pool)
    .await?;

    let deleted = result.rows_affected();
    tracing::info!(deleted, "cleared unreferenced image records");

    Ok(ApiResponse::success(
        format!("Deleted {deleted} image records"),
        ClearResult { deleted },
        Some(Meta::empty()),
    ))
}

#[derive(Debug, sqlx::FromRow)]
struct AssociatedRow {
    product_id: Uuid,
    product_name: String,
    stock_count: i32,
    file_path: String,
}

#[derive(Debug, sqlx::FromRow)]
struct UnassociatedRow {
    file_path: String,
}
