use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use property_lookup::api;
use property_lookup::core::{AddressQuery, AddressRecord, AddressStore, SaleBinding, SaleHistory};
use property_lookup::domain::model::Position;
use property_lookup::{PropertyError, PropertyService, Result};
use serde_json::Value;
use tower::ServiceExt;

const ADDRESS_SPLIT_ERROR: &str =
    "Could not split combined street, PAON and SAON into respective parts. Expected street_PAON_SAON.";

struct StubAddresses {
    records: Vec<AddressRecord>,
    queries: Arc<Mutex<Vec<AddressQuery>>>,
}

#[async_trait]
impl AddressStore for StubAddresses {
    async fn find(&self, query: &AddressQuery) -> Result<Vec<AddressRecord>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.records.clone())
    }
}

enum StubSales {
    Rows(Vec<SaleBinding>),
    Failing,
}

#[async_trait]
impl SaleHistory for StubSales {
    async fn sales(&self, _query: &AddressQuery) -> Result<Vec<SaleBinding>> {
        match self {
            StubSales::Rows(rows) => Ok(rows.clone()),
            StubSales::Failing => Err(PropertyError::upstream(
                "price paid endpoint",
                "connection refused",
            )),
        }
    }
}

fn albert_road() -> AddressRecord {
    AddressRecord {
        building_number: Some(10),
        sub_building_name: "FLAT 2    ".to_string(),
        thoroughfare_name: "ALBERT ROAD      ".to_string(),
        post_town: "PLYMOUTH     ".to_string(),
        dependent_locality: "STOKE    ".to_string(),
        postcode: "PL2 1AD ".to_string(),
        position: Position {
            x: -4.1652,
            y: 50.3755,
        },
        ..Default::default()
    }
}

fn sale(amount: &str, date: &str, property_type: &str) -> SaleBinding {
    SaleBinding {
        amount: Some(amount.to_string()),
        date: Some(date.to_string()),
        property_type: Some(format!(
            "http://landregistry.data.gov.uk/def/common/{}",
            property_type
        )),
    }
}

fn app(records: Vec<AddressRecord>, sales: StubSales) -> (axum::Router, Arc<Mutex<Vec<AddressQuery>>>) {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let addresses = StubAddresses {
        records,
        queries: queries.clone(),
    };
    let service = Arc::new(PropertyService::new(addresses, sales));
    (api::router(service), queries)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_returns_property_with_single_sale() {
    let (app, queries) = app(
        vec![albert_road()],
        StubSales::Rows(vec![sale("100000", "2003-04-17", "semi-detached")]),
    );

    let (status, body) = get(app, "/properties/PL2%201AD/ALBERT%20ROAD_10_FLAT%202").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "100000");
    assert_eq!(body["date"], "2003-04-17");
    assert_eq!(body["property_type"], "semi-detached");
    assert_eq!(body["saon"], "FLAT 2");
    assert_eq!(body["paon"], "10");
    assert_eq!(body["street"], "ALBERT ROAD");
    assert_eq!(body["town"], "PLYMOUTH");
    assert_eq!(body["county"], "STOKE");
    assert_eq!(body["postcode"], "PL2 1AD");
    assert_eq!(body["coordinates"]["latitude"], 50.3755);
    assert_eq!(body["coordinates"]["longitude"], -4.1652);

    let queries = queries.lock().unwrap();
    assert_eq!(queries[0].postcode, "PL2 1AD");
    assert_eq!(queries[0].street, "ALBERT ROAD");
    assert_eq!(queries[0].saon.as_deref(), Some("FLAT 2"));
}

#[tokio::test]
async fn test_returns_latest_of_several_sales() {
    let (app, _) = app(
        vec![albert_road()],
        StubSales::Rows(vec![
            sale("100000", "2003-04-17", "semi-detached"),
            sale("100001", "2003-04-18", "semi-detached"),
        ]),
    );

    let (status, body) = get(app, "/properties/PL2%201AD/ALBERT%20ROAD_10_FLAT%202").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "100001");
    assert_eq!(body["date"], "2003-04-18");
}

#[tokio::test]
async fn test_no_sales_gives_null_fields() {
    let (app, _) = app(vec![albert_road()], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/properties/PL2%201AD/ALBERT%20ROAD_10_FLAT%202").await;

    assert_eq!(status, StatusCode::OK);
    let object = body.as_object().unwrap();
    assert!(object.contains_key("amount") && object["amount"].is_null());
    assert!(object.contains_key("date") && object["date"].is_null());
    assert!(object.contains_key("property_type") && object["property_type"].is_null());
}

#[tokio::test]
async fn test_no_address_match_is_404() {
    let (app, _) = app(vec![], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/properties/PL6%208RU/PATTINSON%20DRIVE_100").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn test_multiple_address_matches_is_500() {
    let (app, _) = app(vec![albert_road(), albert_road()], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/properties/PL6%208RU/PATTINSON%20DRIVE_100").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], 500);
    assert!(body["text"].as_str().unwrap().contains("More than one record found"));
}

#[tokio::test]
async fn test_missing_delimiter_is_404_with_message() {
    let (app, queries) = app(vec![albert_road()], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/properties/PL6%208RU/PATTINSON%20DRIVE100").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["text"], ADDRESS_SPLIT_ERROR);
    assert!(queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_too_many_delimiters_is_404_with_message() {
    let (app, _) = app(vec![albert_road()], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/properties/PL6%208RU/PAT_TIN_SON_RIVE100").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["text"], ADDRESS_SPLIT_ERROR);
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    let (app, _) = app(vec![albert_road()], StubSales::Failing);

    let (status, body) = get(app, "/properties/PL2%201AD/ALBERT%20ROAD_10_FLAT%202").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], 500);
}

#[tokio::test]
async fn test_unknown_property_type_is_500() {
    let (app, _) = app(
        vec![albert_road()],
        StubSales::Rows(vec![sale("1", "2020-01-01", "castle")]),
    );

    let (status, body) = get(app, "/properties/PL2%201AD/ALBERT%20ROAD_10_FLAT%202").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["text"].as_str().unwrap().contains("castle"));
}

#[tokio::test]
async fn test_incomplete_path_is_404() {
    let (app, _) = app(vec![albert_road()], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/properties/Trewithy%20Court").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn test_undecodable_segment_is_json_404() {
    let (app, queries) = app(vec![albert_road()], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/properties/PL6%208RU/PATTINSON%FF_100").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
    assert!(body["text"].is_string());
    assert!(queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app(vec![], StubSales::Rows(vec![]));

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
