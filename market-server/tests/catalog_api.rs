//! HTTP-level tests: the full router against an embedded store.
//!
//! Drives the router as a tower Service, the same way the production
//! server does, so routing, extractors and the error envelope are all
//! exercised without binding a port.

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use surrealdb::sql::Thing;
use tower::Service;

use market_server::core::{Config, ServerState, build_app};
use market_server::db::DbService;
use market_server::db::models::{City, Product, ProductCategory, Service as CatalogService, ServiceCategory};
use market_server::db::repository::{
    CityRepository, ProductCategoryRepository, ProductRepository, ServiceCategoryRepository,
    ServiceRepository,
};

struct TestApp {
    _tmp: tempfile::TempDir,
    app: Router,
    city: Thing,
    sofa: Thing,
}

async fn test_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let db_service = DbService::new(tmp.path().to_str().unwrap()).await.unwrap();
    let db = db_service.db;

    let city = CityRepository::new(db.clone())
        .create(City::new("Goa", "goa"))
        .await
        .unwrap();

    let furniture = ProductCategoryRepository::new(db.clone())
        .create(ProductCategory::new("Furniture", "furniture"))
        .await
        .unwrap();
    let sofa = ProductRepository::new(db.clone())
        .create(Product::new(
            "Three Seater Sofa",
            "three-seater-sofa",
            furniture.id.unwrap(),
            1000,
            3000,
        ))
        .await
        .unwrap();

    let home_care = ServiceCategoryRepository::new(db.clone())
        .create(ServiceCategory::new("Home Care", "home-care"))
        .await
        .unwrap();
    ServiceRepository::new(db.clone())
        .create(
            CatalogService::new("Deep Cleaning", "deep-cleaning", home_care.id.unwrap())
                .with_amount(1500, "Starting from ₹1,500"),
        )
        .await
        .unwrap();

    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::new(config, db);
    let app = build_app().with_state(state);

    TestApp {
        _tmp: tmp,
        app,
        city: city.id.unwrap(),
        sofa: sofa.id.unwrap(),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_reports_ok() {
    let mut tc = test_app().await;
    let (status, body) = send(&mut tc.app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn catalog_prices_follow_the_profiles() {
    let mut tc = test_app().await;

    // City-wide 2.0, sofa-specific 1.5
    let (status, _) = send(
        &mut tc.app,
        post_json(
            "/api/location-profiles",
            json!({
                "city": tc.city.to_string(),
                "scope": "CITY",
                "price_multiplier": 2.0,
                "custom_intro": "Rent furniture in Goa",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, created) = send(
        &mut tc.app,
        post_json(
            "/api/location-profiles",
            json!({
                "city": tc.city.to_string(),
                "scope": "PRODUCT",
                "product": tc.sofa.to_string(),
                "price_multiplier": 1.5,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["scope"], "PRODUCT");

    // Product listing: sofa uses its own 1.5, city content block is present
    let (status, body) = send(&mut tc.app, get("/api/catalog/products?city=goa")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    let data = &body["data"];
    assert_eq!(data["city"]["slug"], "goa");
    assert_eq!(data["content"]["custom_intro"], "Rent furniture in Goa");
    assert_eq!(data["products"][0]["min_price"], 1500);
    assert_eq!(data["products"][0]["max_price"], 4500);

    // Service listing: no SERVICE-scope profile, so pricing is untouched
    let (status, body) = send(&mut tc.app, get("/api/catalog/services?city=goa")).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["services"][0]["pricing"]["amount"], 1500);

    // Raw profile records never appear on catalog paths
    assert!(data.get("profiles").is_none());

    // Delete the sofa profile: next read falls back to the city-wide 2.0
    let profile_id = created["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &mut tc.app,
        delete(&format!("/api/location-profiles/{profile_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&mut tc.app, get("/api/catalog/products?city=goa")).await;
    assert_eq!(body["data"]["products"][0]["min_price"], 2000);
}

#[tokio::test]
async fn write_path_maps_errors_to_statuses() {
    let mut tc = test_app().await;

    // Unknown scope -> 400
    let (status, body) = send(
        &mut tc.app,
        post_json(
            "/api/location-profiles",
            json!({"city": tc.city.to_string(), "scope": "NEIGHBOURHOOD"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Extraneous target -> 400
    let (status, _) = send(
        &mut tc.app,
        post_json(
            "/api/location-profiles",
            json!({
                "city": tc.city.to_string(),
                "scope": "CITY",
                "product": tc.sofa.to_string(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Dangling target -> 400
    let (status, _) = send(
        &mut tc.app,
        post_json(
            "/api/location-profiles",
            json!({
                "city": tc.city.to_string(),
                "scope": "PRODUCT",
                "product": "product:doesnotexist",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Over-long SEO title -> 400
    let (status, _) = send(
        &mut tc.app,
        post_json(
            "/api/location-profiles",
            json!({
                "city": tc.city.to_string(),
                "scope": "CITY",
                "seo_title_override": "x".repeat(71),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate -> 409
    let create = json!({"city": tc.city.to_string(), "scope": "CITY"});
    let (status, _) = send(&mut tc.app, post_json("/api/location-profiles", create.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&mut tc.app, post_json("/api/location-profiles", create)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    // Unknown city on the read path -> 404
    let (status, body) = send(&mut tc.app, get("/api/catalog/products?city=atlantis")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");

    // Missing profile id -> 404
    let (status, _) = send(&mut tc.app, get("/api/location-profiles/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
