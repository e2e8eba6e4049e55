use storefront_api::{
    dto::orders::PlaceOrderRequest,
    error::AppError,
    services::{
        image_service::{allowed_file, sanitize_filename},
        order_service::OrderDraft,
    },
};
use uuid::Uuid;

fn request(
    product_id: Option<&str>,
    customer_name: Option<&str>,
    order_quantity: Option<&str>,
) -> PlaceOrderRequest {
    PlaceOrderRequest {
        product_id: product_id.map(String::from),
        customer_name: customer_name.map(String::from),
        order_quantity: order_quantity.map(String::from),
    }
}

#[test]
fn rejects_missing_product_id() {
    let err = OrderDraft::parse(request(None, Some("Alice"), Some("1"))).unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "missing product id"));
}

#[test]
fn rejects_malformed_product_id() {
    let err = OrderDraft::parse(request(Some("not-a-uuid"), Some("Alice"), Some("1"))).unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "missing product id"));
}

#[test]
fn rejects_blank_customer_name() {
    let id = Uuid::new_v4().to_string();
    let err = OrderDraft::parse(request(Some(&id), Some("   "), Some("1"))).unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "missing customer name"));

    let err = OrderDraft::parse(request(Some(&id), None, Some("1"))).unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "missing customer name"));
}

#[test]
fn quantity_defaults_to_one() {
    let id = Uuid::new_v4();
    let draft = OrderDraft::parse(request(Some(&id.to_string()), Some("Alice"), None)).unwrap();
    assert_eq!(draft.quantity, 1);
    assert_eq!(draft.product_id, id);
}

#[test]
fn rejects_non_positive_quantity() {
    let id = Uuid::new_v4().to_string();
    for quantity in ["0", "-1", "abc", ""] {
        let err =
            OrderDraft::parse(request(Some(&id), Some("Dan"), Some(quantity))).unwrap_err();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "invalid quantity"),
            "quantity {quantity:?} should be rejected"
        );
    }
}

#[test]
fn parses_valid_order() {
    let id = Uuid::new_v4();
    let draft =
        OrderDraft::parse(request(Some(&id.to_string()), Some("  Alice  "), Some("3"))).unwrap();
    assert_eq!(
        draft,
        OrderDraft {
            product_id: id,
            customer_name: "Alice".to_string(),
            quantity: 3,
        }
    );
}

#[test]
fn sanitize_strips_path_components() {
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("dir\\photo.png"), "photo.png");
    assert_eq!(sanitize_filename("my photo.png"), "myphoto.png");
    assert_eq!(sanitize_filename(".."), "");
}

#[test]
fn allowed_extensions_are_case_insensitive() {
    assert!(allowed_file("pic.PNG"));
    assert!(allowed_file("doc.pdf"));
    assert!(!allowed_file("tool.exe"));
    assert!(!allowed_file("noextension"));
    assert!(!allowed_file(".png"));
}
