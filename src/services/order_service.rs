use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::orders::{
        OrderConfirmation, OrderPage, OrderWithMovements, PlaceOrderRequest, RecentOrder,
        RecentOrderList,
    },
    error::{AppError, AppResult},
    models::{Order, StockMovement},
    response::{ApiResponse, Meta},
    services::{image_service, product_service},
    state::AppState,
};

/// Flat unit price in minor units; products carry no price column yet.
pub const UNIT_PRICE: i64 = 1_000;

const RECENT_ORDERS_LIMIT: i64 = 10;

/// A validated order request. Constructing one performs no datastore access.
#[derive(Debug, PartialEq, Eq)]
pub struct OrderDraft {
    pub product_id: Uuid,
    pub customer_name: String,
    pub quantity: i32,
}

impl OrderDraft {
    pub fn parse(req: PlaceOrderRequest) -> Result<Self, AppError> {
        let product_id = req
            .product_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| AppError::Validation("missing product id".to_string()))?;

        let customer_name = req
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("missing customer name".to_string()))?
            .to_string();

        let quantity = req
            .order_quantity
            .as_deref()
            .unwrap_or("1")
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| AppError::Validation("invalid quantity".to_string()))?;

        Ok(Self {
            product_id,
            customer_name,
            quantity,
        })
    }
}

pub async fn place_order(
    state: &AppState,
    req: PlaceOrderRequest,
) -> AppResult<ApiResponse<OrderConfirmation>> {
    let draft = OrderDraft::parse(req)?;
    let confirmation = execute_order(&state.pool, &draft).await?;

    tracing::info!(
        order_id = %confirmation.order_id,
        product = %confirmation.product_name,
        quantity = draft.quantity,
        "order placed"
    );

    Ok(ApiResponse::success(
        "Order created",
        confirmation,
        Some(Meta::empty()),
    ))
}

/// Runs the order as one transaction: stock check, order row, stock movement,
/// stock decrement. Every early return drops the transaction, which rolls it
/// back; either all three writes commit or none do.
async fn execute_order(pool: &DbPool, draft: &OrderDraft) -> Result<OrderConfirmation, AppError> {
    let mut tx = pool.begin().await?;

    // Lock the product row so concurrent orders on the same product serialize
    // on the stock check instead of double-spending the same units.
    let row: Option<(String, i32)> =
        sqlx::query_as("SELECT name, stock_count FROM products WHERE id = $1 FOR UPDATE")
            .bind(draft.product_id)
            .fetch_optional(&mut *tx)
            .await?;

    let (product_name, available) = match row {
        Some(r) => r,
        None => return Err(AppError::NotFound("product")),
    };

    if available < draft.quantity {
        return Err(AppError::InsufficientStock {
            available,
            product_name,
        });
    }

    let total = UNIT_PRICE * i64::from(draft.quantity);

    let (order_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO orders (id, customer_name, total, tax, pretax_amount)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&draft.customer_name)
    .bind(total)
    .bind(0_i64)
    .bind(total)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO stock_movements (id, product_id, order_id, quantity)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(draft.product_id)
    .bind(order_id)
    .bind(draft.quantity)
    .execute(&mut *tx)
    .await?;

    // Conditional decrement re-checks stock at write time; zero rows affected
    // means another transaction drained the stock since our read.
    let updated = sqlx::query(
        "UPDATE products SET stock_count = stock_count - $2 WHERE id = $1 AND stock_count >= $2",
    )
    .bind(draft.product_id)
    .bind(draft.quantity)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::InsufficientStock {
            available,
            product_name,
        });
    }

    tx.commit().await?;

    Ok(OrderConfirmation {
        order_id,
        product_name,
        total,
    })
}

pub async fn recent_orders(state: &AppState) -> AppResult<ApiResponse<RecentOrderList>> {
    let items = fetch_recent(&state.pool).await?;
    Ok(ApiResponse::success(
        "Recent orders",
        RecentOrderList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderWithMovements>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound("order")),
    };

    let movements = sqlx::query_as::<_, StockMovement>(
        "SELECT * FROM stock_movements WHERE order_id = $1 ORDER BY created_at",
    )
    .bind(order.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "Order",
        OrderWithMovements { order, movements },
        Some(Meta::empty()),
    ))
}

pub async fn order_page(state: &AppState) -> AppResult<ApiResponse<OrderPage>> {
    let products = product_service::all_product_summaries(&state.pool).await?;
    let orders = fetch_recent(&state.pool).await?;
    Ok(ApiResponse::success(
        "Order page",
        OrderPage { products, orders },
        Some(Meta::empty()),
    ))
}

#[derive(Debug, sqlx::FromRow)]
struct RecentOrderRow {
    order_id: Uuid,
    product_id: Uuid,
    product_name: String,
    quantity: i32,
    order_date: chrono::DateTime<chrono::Utc>,
    file_path: Option<String>,
    total: i64,
    customer_name: String,
}

async fn fetch_recent(pool: &DbPool) -> Result<Vec<RecentOrder>, AppError> {
    let rows = sqlx::query_as::<_, RecentOrderRow>(
        r#"
        SELECT o.id AS order_id, sm.product_id, p.name AS product_name, sm.quantity,
               o.created_at AS order_date, i.file_path, o.total, o.customer_name
        FROM orders o
        JOIN stock_movements sm ON sm.order_id = o.id
        JOIN products p ON p.id = sm.product_id
        LEFT JOIN images i ON i.id = p.image_id
        ORDER BY o.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(RECENT_ORDERS_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RecentOrder {
            order_id: row.order_id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            order_date: row.order_date,
            image_url: row.file_path.as_deref().map(image_service::image_url),
            total: row.total,
            customer_name: row.customer_name,
        })
        .collect())
}
