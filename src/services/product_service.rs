use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::products::{NewProductUpload, ProductList, ProductSummary, UploadResponse},
    error::{AppError, AppResult},
    models::{ImageRecord, Product},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::image_service,
    state::AppState,
};

const DEFAULT_REVIEW: &str = "Sample Review";

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = pagination.normalize();

    let rows = sqlx::query_as::<_, ProductSummaryRow>(
        r#"
        SELECT p.id, p.name, p.stock_count, i.file_path
        FROM products p
        LEFT JOIN images i ON i.id = p.image_id
        ORDER BY p.created_at
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(&state.pool)
        .await?;

    let items = rows.into_iter().map(ProductSummary::from).collect();
    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound("product")),
    };
    Ok(ApiResponse::success("Product", product, None))
}

/// Upload flow: validate the multipart fields, write the file under the upload
/// directory, then insert the image row and its product row in one transaction
/// linked by the canonical `image_id` key.
pub async fn create_product(
    state: &AppState,
    upload: NewProductUpload,
) -> AppResult<ApiResponse<UploadResponse>> {
    let file_name = upload
        .file_name
        .as_deref()
        .ok_or_else(|| AppError::Validation("missing file part".to_string()))?;
    if file_name.is_empty() {
        return Err(AppError::Validation("no file selected".to_string()));
    }
    if !image_service::allowed_file(file_name) {
        return Err(AppError::Validation("file type not allowed".to_string()));
    }

    let bytes = upload
        .file_bytes
        .ok_or_else(|| AppError::Validation("missing file part".to_string()))?;

    let product_name = upload
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("missing product name".to_string()))?
        .to_string();

    let stock_count = upload
        .initial_stock_count
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<i32>().ok())
        .filter(|n| *n >= 0)
        .ok_or_else(|| AppError::Validation("invalid initial stock count".to_string()))?;

    let file_name = image_service::sanitize_filename(file_name);
    if file_name.is_empty() {
        return Err(AppError::Validation("invalid file name".to_string()));
    }

    image_service::store_file(&state.upload_dir, &file_name, &bytes).await?;

    let mut tx = state.pool.begin().await?;

    let image: ImageRecord = sqlx::query_as(
        "INSERT INTO images (id, file_path, product_name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&file_name)
    .bind(&product_name)
    .fetch_one(&mut *tx)
    .await?;

    let product: Product = sqlx::query_as(
        r#"
        INSERT INTO products (id, name, image_id, stock_count, review)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&product_name)
    .bind(image.id)
    .bind(stock_count)
    .bind(DEFAULT_REVIEW)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(product_id = %product.id, image_id = %image.id, "product created");

    let data = UploadResponse {
        img_url: image_service::image_url(&file_name),
        filename: file_name,
        product,
    };
    Ok(ApiResponse::success(
        "Upload successful",
        data,
        Some(Meta::empty()),
    ))
}

/// Full catalog with image URLs, as the order page shows it.
pub async fn all_product_summaries(pool: &DbPool) -> Result<Vec<ProductSummary>, AppError> {
    let rows = sqlx::query_as::<_, ProductSummaryRow>(
        r#"
        SELECT p.id, p.name, p.stock_count, i.file_path
        FROM products p
        LEFT JOIN images i ON i.id = p.image_id
        ORDER BY p.created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ProductSummary::from).collect())
}

#[derive(Debug, sqlx::FromRow)]
struct ProductSummaryRow {
    id: Uuid,
    name: String,
    stock_count: i32,
    file_path: Option<String>,
}

impl From<ProductSummaryRow> for ProductSummary {
    fn from(row: ProductSummaryRow) -> Self {
        ProductSummary {
            product_id: row.id,
            product_name: row.name,
            stock_count: row.stock_count,
            image_url: row.file_path.as_deref().map(image_service::image_url),
            file_path: row.file_path,
        }
    }
}
