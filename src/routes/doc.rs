use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        images::{ClearResult, GalleryEntry, GalleryList},
        orders::{
            OrderConfirmation, OrderPage, OrderWithMovements, PlaceOrderRequest, RecentOrder,
            RecentOrderList,
        },
        products::{ProductList, ProductSummary, UploadResponse},
    },
    models::{ImageRecord, Order, Product, StockMovement},
    response::{ApiResponse, Meta},
    routes::{health, images, orders, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::upload_product,
        products::list_products,
        products::get_product,
        orders::place_order,
        orders::recent_orders,
        orders::get_order,
        orders::order_page,
        images::list_gallery,
        images::get_image,
        images::clear_images,
    ),
    components(
        schemas(
            Product,
            Order,
            StockMovement,
            ImageRecord,
            PlaceOrderRequest,
            OrderConfirmation,
            RecentOrder,
            RecentOrderList,
            OrderPage,
            OrderWithMovements,
            ProductSummary,
            ProductList,
            UploadResponse,
            GalleryEntry,
            GalleryList,
            ClearResult,
            params::Pagination,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<UploadResponse>,
            ApiResponse<OrderConfirmation>,
            ApiResponse<RecentOrderList>,
            ApiResponse<OrderWithMovements>,
            ApiResponse<OrderPage>,
            ApiResponse<GalleryList>,
            ApiResponse<ClearResult>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog and upload endpoints"),
        (name = "Orders", description = "Order placement and history endpoints"),
        (name = "Images", description = "Image gallery endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
