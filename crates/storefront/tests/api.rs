//! End-to-end tests over the assembled router.
//!
//! Each test drives the real application (routes, session layer, file-backed
//! cart store in a temp directory) with `tower::ServiceExt::oneshot`. The
//! catalog base URL points at an unroutable address, exercising the
//! degrade-to-empty policy for list routes; cart and theme routes never
//! touch the network.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use stech_storefront::cart::{CART_KEY, FileStore, KeyValueStore};
use stech_storefront::config::{SentryConfig, StorefrontConfig};
use stech_storefront::routes;
use stech_storefront::state::AppState;

fn test_config(store_path: &Path) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        // Unroutable: catalog calls fail fast and list routes degrade
        catalog_base_url: "http://127.0.0.1:9/stech-store/v1".parse().unwrap(),
        cart_store_path: store_path.to_path_buf(),
        sentry: SentryConfig::default(),
    }
}

fn test_app(store_path: &Path) -> Router {
    let state = AppState::new(test_config(store_path)).unwrap();
    routes::app(state)
}

async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn produto(id: &str, nome: &str, preco: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "nomeProduto": nome,
        "preco": preco,
        "fotoProduto": format!("https://cdn.example/{id}.png"),
        "descricao": "Um produto de teste"
    })
}

#[tokio::test]
async fn health_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir.path().join("store.json"));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_cart_renders_zero_total() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir.path().join("store.json"));

    let response = app.oneshot(get("/carrinho")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cart = read_json(response).await;
    assert_eq!(cart["itens"].as_array().unwrap().len(), 0);
    assert_eq!(cart["total"], "R$ 0.00");
    assert_eq!(cart["contagem"], 0);
}

#[tokio::test]
async fn add_update_remove_flow() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir.path().join("store.json"));

    // Two units of A, one of B
    let body = serde_json::json!({"produto": produto("a", "Camiseta", 10.0), "quantidade": 2});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/carrinho/itens", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(read_json(response).await["contagem"], 2);

    let body = serde_json::json!({"produto": produto("b", "Boné", 5.0)});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/carrinho/itens", &body))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["contagem"], 3);

    // Grouped view: 10*2 + 5*1 = 25.00, first-seen order
    let cart = read_json(app.clone().oneshot(get("/carrinho")).await.unwrap()).await;
    let itens = cart["itens"].as_array().unwrap();
    assert_eq!(itens.len(), 2);
    assert_eq!(itens[0]["id"], "a");
    assert_eq!(itens[0]["quantidade"], 2);
    assert_eq!(itens[1]["id"], "b");
    assert_eq!(cart["total"], "R$ 25.00");

    // Quantity floor: zero removes the line
    let body = serde_json::json!({"quantidade": 0});
    let cart = read_json(
        app.clone()
            .oneshot(json_request("PUT", "/carrinho/itens/a", &body))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cart["itens"].as_array().unwrap().len(), 1);
    assert_eq!(cart["itens"][0]["id"], "b");
    assert_eq!(cart["total"], "R$ 5.00");

    // Remove the rest
    let cart = read_json(
        app.clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/carrinho/itens/b")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cart["itens"].as_array().unwrap().len(), 0);

    let count = read_json(app.oneshot(get("/carrinho/contagem")).await.unwrap()).await;
    assert_eq!(count["contagem"], 0);
}

#[tokio::test]
async fn checkout_clears_the_persisted_key() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");
    let app = test_app(&store_path);

    let body = serde_json::json!({"produto": produto("a", "Camiseta", 10.0), "quantidade": 3});
    app.clone()
        .oneshot(json_request("POST", "/carrinho/itens", &body))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/carrinho/finalizar",
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["mensagem"], "Compra Finalizada!");

    // The key is gone from the store file, not just emptied
    let store = FileStore::open(&store_path).unwrap();
    assert!(store.get(CART_KEY).unwrap().is_none());

    let cart = read_json(app.oneshot(get("/carrinho")).await.unwrap()).await;
    assert_eq!(cart["itens"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn cart_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");

    let app = test_app(&store_path);
    let body = serde_json::json!({"produto": produto("a", "Camiseta", 10.0), "quantidade": 2});
    app.oneshot(json_request("POST", "/carrinho/itens", &body))
        .await
        .unwrap();

    // A fresh application over the same store file sees the same cart
    let app = test_app(&store_path);
    let cart = read_json(app.oneshot(get("/carrinho")).await.unwrap()).await;
    assert_eq!(cart["itens"][0]["quantidade"], 2);
    assert_eq!(cart["total"], "R$ 20.00");
}

#[tokio::test]
async fn cart_regroups_raw_units_written_by_another_surface() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");

    // Simulate a detail page that appended flat units directly
    let store = FileStore::open(&store_path).unwrap();
    let units = serde_json::json!([
        produto("a", "Camiseta", 10.0),
        produto("b", "Boné", 5.0),
        produto("a", "Camiseta", 10.0),
    ]);
    store
        .set(CART_KEY, &serde_json::to_string(&units).unwrap())
        .unwrap();

    let app = test_app(&store_path);
    let cart = read_json(app.oneshot(get("/carrinho")).await.unwrap()).await;
    let itens = cart["itens"].as_array().unwrap();
    assert_eq!(itens.len(), 2);
    assert_eq!(itens[0]["id"], "a");
    assert_eq!(itens[0]["quantidade"], 2);
    assert_eq!(itens[1]["quantidade"], 1);
    assert_eq!(cart["contagem"], 3);
}

#[tokio::test]
async fn malformed_persisted_cart_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");

    let store = FileStore::open(&store_path).unwrap();
    store.set(CART_KEY, "{\"not\": \"an array\"}").unwrap();

    let app = test_app(&store_path);
    let response = app.oneshot(get("/carrinho")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["contagem"], 0);
}

#[tokio::test]
async fn catalog_failure_degrades_lists_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir.path().join("store.json"));

    let response = app.clone().oneshot(get("/produtos")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 0);

    let response = app.oneshot(get("/categorias")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn product_detail_maps_catalog_failure_to_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir.path().join("store.json"));

    let response = app.oneshot(get("/produtos/17")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn theme_toggle_round_trips_through_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir.path().join("store.json"));

    // Defaults to light
    let response = app.clone().oneshot(get("/tema")).await.unwrap();
    assert_eq!(read_json(response).await["modo_escuro"], false);

    // First toggle goes dark and sets a session cookie
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/tema/alternar",
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert_eq!(read_json(response).await["modo_escuro"], true);

    // Second toggle on the same session goes back to light
    let request = Request::builder()
        .method("POST")
        .uri("/tema/alternar")
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(read_json(response).await["modo_escuro"], false);
}
