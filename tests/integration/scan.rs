use meli_api::rest::{ErrorKind, ProductId, MULTIGET_LIMIT};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client_for, seller_credentials, SELLER_ID};

fn item_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("MLA9{i:05}")).collect()
}

async fn mount_scan(server: &MockServer, ids: &[String]) {
    let search = format!("/users/{SELLER_ID}/items/search");
    let (first, second) = ids.split_at(ids.len() / 2);

    Mock::given(method("GET"))
        .and(path(search.as_str()))
        .and(query_param_is_missing("scroll_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": first,
            "scroll_id": "page-2"
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(search.as_str()))
        .and(query_param("scroll_id", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": second,
            "scroll_id": "page-3"
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(search.as_str()))
        .and(query_param("scroll_id", "page-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_every_listing() {
    let server = MockServer::start().await;
    let ids = item_ids(50);
    mount_scan(&server, &ids).await;

    for chunk in ids.chunks(MULTIGET_LIMIT) {
        let entries: Vec<_> = chunk
            .iter()
            .map(|id| json!({"code": 200, "body": {"id": id, "title": format!("Item {id}")}}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("ids", chunk.join(",")))
            .respond_with(ResponseTemplate::new(200).set_body_json(entries))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server, seller_credentials());
    let products = client.fetch_products().await.unwrap();

    assert_eq!(products.len(), 50);
    let mut fetched: Vec<String> = products
        .iter()
        .filter_map(|p| p.id.as_ref().map(ToString::to_string))
        .collect();
    fetched.sort();
    assert_eq!(fetched, ids);
}

#[tokio::test]
async fn test_multiget_limit_is_enforced_before_sending() {
    let server = MockServer::start().await;
    let client = client_for(&server, seller_credentials());

    let ids: Vec<ProductId> = item_ids(MULTIGET_LIMIT + 1)
        .into_iter()
        .map(ProductId::from)
        .collect();
    let err = client.get_products(&ids).await.unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::InvalidMultigetQuantity { given: 21, max: 20 }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}
