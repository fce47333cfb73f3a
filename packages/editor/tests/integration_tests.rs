//! Edit sessions against a site host

use folio_editor::{EditSession, EditorError, IdGenerator, Mutation};
use folio_model::{BlockKind, StyleKey};
use folio_store::{MemoryStore, SiteHost, StoreError};
use serde_json::json;
use std::sync::Arc;

async fn host_with(store: Arc<MemoryStore>) -> SiteHost {
    SiteHost::start(store).await
}

fn about_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(json!({
        "navigation": [
            { "name": "ABOUT", "path": "/about", "dropdown": [
                { "name": "About Overview", "path": "/about/overview" }
            ]}
        ],
        "about-overview": { "blocks": [] },
        "contact": { "email": "info@example.com" }
    })))
}

#[tokio::test]
async fn test_initialize_restyle_and_save() {
    let store = about_store();
    let host = host_with(store.clone()).await;
    let mut session = EditSession::open("admin", &host);

    let created = session
        .apply(Mutation::InitializeDefaults {
            page: "about-overview".to_string(),
        })
        .unwrap()
        .created;
    assert_eq!(created.len(), 2);

    let page = session.document().block_page("about-overview").unwrap();
    assert!(page.blocks.iter().all(|b| b.kind == BlockKind::Text));
    assert_eq!(page.blocks[0].content, "Welcome to the new page!");
    assert_eq!(page.blocks[1].content, "Start adding your content here.");
    let untouched = page.blocks[1].clone();

    session
        .apply(Mutation::SetStyle {
            page: "about-overview".to_string(),
            id: created[0].clone(),
            property: "textAlign".to_string(),
            value: "center".to_string(),
        })
        .unwrap();
    assert!(session.is_dirty());

    session.save(&host).await.unwrap();
    assert!(!session.is_dirty());
    assert!(session.pending().is_empty());

    let saved = store.snapshot().unwrap();
    let blocks = saved["about-overview"]["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["styles"]["textAlign"], "center");
    assert_eq!(blocks[0]["styles"]["fontSize"], "32px");
    assert_eq!(blocks[1], serde_json::to_value(&untouched).unwrap());
    assert_eq!(saved["contact"], json!({ "email": "info@example.com" }));

    // The host now serves the saved document
    assert_eq!(*host.current(), *session.document());
}

#[tokio::test]
async fn test_failed_save_keeps_working_copy() {
    let store = about_store();
    let host = host_with(store.clone()).await;
    let mut session = EditSession::with_ids("admin", host.current(), IdGenerator::starting_at(1));

    session
        .apply(Mutation::AddBlock {
            page: "about-overview".to_string(),
            kind: BlockKind::Image,
        })
        .unwrap();
    let working = session.document().clone();

    store.fail_next_save();
    let error = session.save(&host).await.unwrap_err();
    assert!(error.is_retryable());
    assert_eq!(*session.document(), working);
    assert!(session.is_dirty());
    assert_eq!(session.pending().len(), 1);
    assert!(host.current().block_page("about-overview").unwrap().is_empty());

    // Retry succeeds
    session.save(&host).await.unwrap();
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn test_read_only_store_is_permanent() {
    let store = about_store();
    store.set_read_only(true);
    let host = host_with(store.clone()).await;
    let mut session = EditSession::open("admin", &host);

    session
        .apply(Mutation::ApplyTemplate {
            page: "about-overview".to_string(),
            template: "Standard".to_string(),
            replace_existing: false,
        })
        .unwrap();

    let error = session.save(&host).await.unwrap_err();
    assert!(matches!(error, EditorError::Store(StoreError::SaveUnsupported(_))));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_reload_discards_edits() {
    let host = host_with(about_store()).await;
    let mut session = EditSession::open("admin", &host);

    session
        .apply(Mutation::AddBlock {
            page: "contact".to_string(),
            kind: BlockKind::Text,
        })
        .unwrap();
    assert!(session.is_dirty());

    session.reload(&host);
    assert!(!session.is_dirty());
    assert!(session.document().block_page("contact").is_none());
}

#[tokio::test]
async fn test_form_and_renderer_agree_on_defaults() {
    let host = host_with(about_store()).await;
    let mut session = EditSession::open("admin", &host);

    let created = session
        .apply(Mutation::AddBlock {
            page: "about-overview".to_string(),
            kind: BlockKind::Text,
        })
        .unwrap()
        .created;
    session
        .apply(Mutation::SetStyle {
            page: "about-overview".to_string(),
            id: created[0].clone(),
            property: "color".to_string(),
            value: String::new(),
        })
        .unwrap();

    let block = session.document().block_page("about-overview").unwrap().blocks[0].clone();
    let form = session.form("about-overview", &block.id).unwrap();
    let effective = folio_model::EffectiveStyle::resolve(&block.styles);

    for field in &form.fields {
        assert_eq!(field.value, effective.get(field.key), "{}", field.property);
    }
    assert_eq!(form.value(StyleKey::Color), Some("#333333"));
}
