//! Site host lifecycle over different stores

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use folio_model::{BlockId, SiteDocument};
use folio_store::{
    default_document, ContentStore, DocumentSource, HttpStore, MemoryStore, SiteHost, StoreError,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn stored() -> Value {
    json!({
        "navigation": [],
        "news": { "blocks": [
            { "id": 1, "type": "text", "content": "Hello", "styles": {} },
            { "id": 2, "type": "video", "content": "clip.mp4", "styles": {} }
        ]}
    })
}

#[tokio::test]
async fn test_start_loads_from_store() {
    let host = SiteHost::start(Arc::new(MemoryStore::new(stored()))).await;

    assert_eq!(host.source(), DocumentSource::Store);
    // The unknown block type is held out of the page, the rest survives
    assert_eq!(host.current().block_page("news").unwrap().ids(), vec![BlockId::int(1)]);
}

#[tokio::test]
async fn test_start_falls_back_to_bundled_document() {
    let host = SiteHost::start(Arc::new(MemoryStore::empty())).await;

    assert_eq!(host.source(), DocumentSource::BundledDefault);
    assert_eq!(*host.current(), *default_document());
}

#[tokio::test]
async fn test_commit_replaces_current_on_success() {
    let store = Arc::new(MemoryStore::new(stored()));
    let host = SiteHost::start(store.clone()).await;

    let mut next = (*host.current()).clone();
    next.block_page_mut("news").unwrap().replace_blocks(Vec::new());
    host.commit(next.clone()).await.unwrap();

    assert_eq!(*host.current(), next);
    assert_eq!(store.snapshot().unwrap()["news"]["blocks"], json!([]));
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn test_commit_writes_held_blocks_back() {
    let store = Arc::new(MemoryStore::new(stored()));
    let host = SiteHost::start(store.clone()).await;

    let mut next = (*host.current()).clone();
    next.block_page_mut("news").unwrap().blocks[0].content = "Hello again".to_string();
    host.commit(next).await.unwrap();

    let saved = store.snapshot().unwrap();
    assert_eq!(saved["news"]["blocks"][0]["content"], "Hello again");
    assert_eq!(saved["news"]["blocks"][1], stored()["news"]["blocks"][1]);
}

#[tokio::test]
async fn test_failed_commit_keeps_current() {
    let store = Arc::new(MemoryStore::new(stored()));
    let host = SiteHost::start(store.clone()).await;
    let before = host.current();

    store.fail_next_save();
    let result = host.commit(SiteDocument::new()).await;
    assert!(matches!(result, Err(StoreError::SaveTransient(_))));

    store.set_read_only(true);
    let result = host.commit(SiteDocument::new()).await;
    assert!(matches!(result, Err(StoreError::SaveUnsupported(_))));

    assert_eq!(host.current(), before);
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn test_reload_resets_to_default_when_store_breaks() {
    let store = Arc::new(MemoryStore::new(json!("not an object")));
    let host = SiteHost::start(store.clone()).await;
    assert_eq!(host.source(), DocumentSource::BundledDefault);

    store.save(&stored()).await.unwrap();
    assert_eq!(host.reload().await, DocumentSource::Store);
    assert!(host.current().block_page("news").is_some());
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_http_store_round_trip() {
    let app = Router::new().route(
        "/api/site-data",
        get(|| async { Json(json!({ "home": { "blocks": [] } })) })
            .post(|Json(_body): Json<Value>| async {
                Json(json!({ "message": "Site data updated successfully" }))
            }),
    );
    let store = HttpStore::new(&spawn(app).await);

    assert_eq!(store.load().await.unwrap(), json!({ "home": { "blocks": [] } }));
    store.save(&json!({ "home": {} })).await.unwrap();
}

#[tokio::test]
async fn test_http_store_on_static_host() {
    // Only GET is routed, so writes answer 405
    let app = Router::new().route("/api/site-data", get(|| async { Json(json!({})) }));
    let store = HttpStore::new(&spawn(app).await);

    let result = store.save(&json!({})).await;
    assert!(matches!(result, Err(StoreError::SaveUnsupported(_))));
}

#[tokio::test]
async fn test_http_store_validation_and_outage() {
    let app = Router::new().route(
        "/api/site-data",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "news.blocks[0]: Missing field: styles" })),
            )
        }),
    );
    let store = HttpStore::new(&spawn(app).await);

    assert_eq!(
        store.save(&json!({})).await,
        Err(StoreError::ValidationMismatch(
            "news.blocks[0]: Missing field: styles".to_string()
        ))
    );
    assert!(matches!(store.load().await, Err(StoreError::LoadUnavailable(_))));

    let offline = HttpStore::new("http://127.0.0.1:1");
    assert!(matches!(offline.load().await, Err(StoreError::LoadUnavailable(_))));
    assert!(offline.save(&json!({})).await.unwrap_err().is_retryable());
}
