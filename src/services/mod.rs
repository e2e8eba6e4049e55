pub mod image_service;
pub mod order_service;
pub mod product_service;
