use std::collections::HashMap;

use meli_api::rest::{
    AttributeCombination, BuyingMode, Condition, ErrorKind, Lifecycle, ListingType, Picture,
    Product, ProductId, Variant, VariantId, WebHook,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client_for, seller_credentials, ACCESS_TOKEN};

fn draft() -> Product {
    Product::builder()
        .title("Remera lisa algodón")
        .category_id("MLA109027")
        .price(4500.0)
        .currency_id("ARS")
        .available_quantity(10)
        .condition(Condition::New)
        .buying_mode(BuyingMode::BuyItNow)
        .listing_type(ListingType::GoldSpecial)
        .picture(Picture::from_source("https://example.com/remera.jpg"))
        .variant(
            Variant::new(4500.0, 5)
                .with_combination(AttributeCombination::new("COLOR", "Color", "52049", "Negro"))
                .with_picture_id("611-MLA1"),
        )
        .variant(
            Variant::new(4500.0, 5)
                .with_combination(AttributeCombination::new("COLOR", "Color", "52055", "Blanco"))
                .with_picture_id("611-MLA2"),
        )
        .build()
        .expect("valid draft")
}

fn remote_item(stock_black: i64, stock_white: i64) -> Value {
    json!({
        "id": "MLA800000001",
        "site_id": "MLA",
        "title": "Remera lisa algodón",
        "category_id": "MLA109027",
        "price": 4500,
        "currency_id": "ARS",
        "available_quantity": stock_black + stock_white,
        "buying_mode": "buy_it_now",
        "listing_type_id": "gold_special",
        "condition": "new",
        "status": "active",
        "pictures": [{"id": "611-MLA1", "url": "http://example.com/1.jpg"}],
        "variations": [
            {"id": 1001, "price": 4500, "available_quantity": stock_black,
             "attribute_combinations": [{"id": "COLOR", "name": "Color", "value_id": "52049", "value_name": "Negro"}],
             "picture_ids": ["611-MLA1"]},
            {"id": 1002, "price": 4500, "available_quantity": stock_white,
             "attribute_combinations": [{"id": "COLOR", "name": "Color", "value_id": "52055", "value_name": "Blanco"}],
             "picture_ids": ["611-MLA2"]}
        ]
    })
}

#[tokio::test]
async fn test_listing_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(query_param("access_token", ACCESS_TOKEN))
        .respond_with(ResponseTemplate::new(201).set_body_json(remote_item(5, 5)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/items/MLA800000001"))
        .and(body_json(json!({"status": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "MLA800000001",
            "status": "closed"
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/items/MLA800000001"))
        .and(body_json(json!({"deleted": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "MLA800000001",
            "status": "closed",
            "deleted": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/items/MLA800000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_item(7, 3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, seller_credentials());

    // Create
    let mut product = client.set_product(&draft()).await.expect("create");
    assert_eq!(product.lifecycle(), Lifecycle::Active);
    assert_eq!(product.variants.len(), 2);

    // Update stock per variant
    let deltas = HashMap::from([(VariantId(1001), 2), (VariantId(1002), -2)]);
    product.manage_var_stocks(&deltas);
    let updated = client.set_product(&product).await.expect("update");
    assert_eq!(updated.variant(VariantId(1001)).unwrap().available_quantity, Some(7));

    // Close, then delete
    product.close();
    let closed = client.set_product(&product).await.expect("close");
    assert_eq!(closed.id, product.id);

    let id = product.id.clone().unwrap();
    let deleted = client.delete_product(&id).await.expect("delete");
    assert!(deleted.deleted);

    let requests = server.received_requests().await.unwrap();
    let bodies: Vec<Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[0].method.as_str(), "POST");
    assert!(bodies[1].get("id").is_none());
    assert_eq!(bodies[1]["variations"][0]["available_quantity"], 7);
    assert_eq!(bodies[1]["variations"][1]["available_quantity"], 3);
    assert_eq!(bodies[2], json!({"status": "closed"}));
    assert_eq!(bodies[3], json!({"status": "closed"}));
    assert_eq!(bodies[4], json!({"deleted": true}));
}

#[tokio::test]
async fn test_notification_refetches_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/MLA800000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_item(1, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let hook: WebHook = serde_json::from_value(json!({
        "resource": "/items/MLA800000001",
        "user_id": 202593498,
        "topic": "items",
        "application_id": 5503910054141466u64,
        "attempts": 1,
        "sent": "2024-05-02T13:58:23.347Z",
        "received": "2024-05-02T13:58:23.329Z"
    }))
    .unwrap();

    let client = client_for(&server, seller_credentials());
    let product = client.product_from_webhook(&hook).await.unwrap();
    assert_eq!(product.id, Some(ProductId::from("MLA800000001")));
    assert_eq!(product.available_quantity, Some(1));
}

#[tokio::test]
async fn test_remote_inconsistency_is_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/MLA1"))
        .respond_with(ResponseTemplate::new(502).set_body_string(""))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/MLA2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "caller.id does not match",
            "error": "forbidden",
            "status": 403,
            "cause": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, seller_credentials());

    let err = client.get_product(&ProductId::from("MLA1")).await.unwrap_err();
    assert!(err.is_remote_inconsistency());
    assert!(matches!(err.kind, ErrorKind::Remote(_)));

    let err = client.get_product(&ProductId::from("MLA2")).await.unwrap_err();
    assert!(!err.is_remote_inconsistency());
    assert_eq!(err.remote().unwrap().status, 403);
}
