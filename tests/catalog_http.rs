//! Fetch-on-mount against a mocked catalog endpoint served by axum.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::sync::mpsc::unbounded_channel;

use tcgview::{
    app::{App, FetchState},
    catalog::{CatalogClient, FetchError, HttpCatalog},
    fetch::{run_initial_fetch, spawn_initial_fetch},
    types::{AppEvent, Card},
    view::{self, Body},
};

const BG: &str = "https://example.test/bg.jpg";

/// Serve `router` on an ephemeral port and return the catalog URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v2/cards")
}

/// Mount a screen against `url` and wait for the one result event.
async fn mount(url: &str) -> App {
    let client: Arc<dyn CatalogClient> = Arc::new(HttpCatalog::new(url));
    let (tx, mut rx) = unbounded_channel();
    let mut app = App::new(30);
    spawn_initial_fetch(client, 10, tx);
    let ev = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("fetch settled")
        .expect("one event");
    app.on_event(ev);
    app
}

#[tokio::test]
async fn ok_response_becomes_ready_with_one_row() {
    let router = Router::new().route(
        "/v2/cards",
        get(|| async { Json(json!({ "data": [{ "id": "a1", "name": "Pikachu" }] })) }),
    );
    let app = mount(&serve(router).await).await;

    assert_eq!(app.records(), [Card::new("a1", "Pikachu")].as_slice());
    match view::render(&app, BG).body {
        Body::List { rows, .. } => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].label, "Pikachu");
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[tokio::test]
async fn requests_first_page_with_fixed_size() {
    let router = Router::new().route(
        "/v2/cards",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            let name = format!(
                "page={} pageSize={}",
                q.get("page").map(String::as_str).unwrap_or("-"),
                q.get("pageSize").map(String::as_str).unwrap_or("-"),
            );
            Json(json!({ "data": [{ "id": "q", "name": name }] }))
        }),
    );
    let app = mount(&serve(router).await).await;
    assert_eq!(app.records()[0].name, "page=1 pageSize=10");
}

#[tokio::test]
async fn server_error_becomes_error_state() {
    let router = Router::new().route(
        "/v2/cards",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let app = mount(&serve(router).await).await;

    assert!(matches!(app.state(), FetchState::Error(_)));
    assert!(app.records().is_empty());
    match view::render(&app, BG).body {
        Body::Error { message } => {
            assert!(message.contains("Network response was not ok"));
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[tokio::test]
async fn non_json_ok_body_is_an_error() {
    let router = Router::new().route("/v2/cards", get(|| async { "<html>maintenance</html>" }));
    let app = mount(&serve(router).await).await;
    assert!(matches!(app.state(), FetchState::Error(m) if m.starts_with("Malformed")));
}

#[tokio::test]
async fn missing_data_property_is_an_empty_list() {
    let router = Router::new().route("/v2/cards", get(|| async { Json(json!({ "page": 1 })) }));
    let app = mount(&serve(router).await).await;
    assert_eq!(app.state(), &FetchState::Ready(Vec::new()));
}

#[tokio::test]
async fn hanging_endpoint_stays_loading() {
    let router = Router::new().route(
        "/v2/cards",
        get(|| async {
            std::future::pending::<()>().await;
            StatusCode::OK
        }),
    );
    let url = serve(router).await;

    let client: Arc<dyn CatalogClient> = Arc::new(HttpCatalog::new(url));
    let (tx, mut rx) = unbounded_channel();
    let app = App::new(30);
    let task = spawn_initial_fetch(client, 10, tx);

    let waited = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(waited.is_err(), "no result should arrive");
    assert_eq!(app.state(), &FetchState::Loading);
    assert!(matches!(view::render(&app, BG).body, Body::Progress { .. }));
    task.abort();
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpCatalog::new(format!("http://{addr}/v2/cards"))
        .fetch_page(1, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn result_after_teardown_is_dropped() {
    let router = Router::new().route(
        "/v2/cards",
        get(|| async { Json(json!({ "data": [{ "id": "a1", "name": "Pikachu" }] })) }),
    );
    let url = serve(router).await;
    let client: Arc<dyn CatalogClient> = Arc::new(HttpCatalog::new(url));
    let (tx, mut rx) = unbounded_channel();
    let mut app = App::new(30);
    spawn_initial_fetch(client, 10, tx);

    app.unmount();
    if let Some(ev) = rx.recv().await {
        app.on_event(ev);
    }
    assert_eq!(app.state(), &FetchState::Loading);
}

struct FixedCatalog(Vec<Card>);

#[async_trait]
impl CatalogClient for FixedCatalog {
    async fn fetch_page(&self, page: u32, _page_size: u32) -> Result<Vec<Card>, FetchError> {
        assert_eq!(page, 1);
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn closed_channel_is_tolerated() {
    let (tx, rx) = unbounded_channel::<AppEvent>();
    drop(rx);
    run_initial_fetch(&FixedCatalog(vec![Card::new("a1", "Pikachu")]), 10, tx).await;
}

#[tokio::test]
async fn fetch_sends_exactly_one_event() {
    let (tx, mut rx) = unbounded_channel();
    run_initial_fetch(&FixedCatalog(vec![Card::new("a1", "Pikachu")]), 10, tx).await;

    assert!(matches!(rx.recv().await, Some(AppEvent::CardsLoaded(c)) if c.len() == 1));
    assert!(rx.recv().await.is_none());
}
