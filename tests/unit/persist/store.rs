use super::*;
use crate::config::model::merge;
use crate::config::theme::ColorTheme;
use serde_json::json;

#[test]
fn memory_store_round_trips_the_full_config() {
    let mut store = MemoryStore::new();
    assert!(store.load().is_none());

    let config = DesignerConfig {
        title: "Hello".to_owned(),
        color_theme: ColorTheme::Teal,
        ..DesignerConfig::default()
    };
    store.save(&config).unwrap();
    assert_eq!(store.save_count(), 1);

    let patch = store.load().unwrap();
    assert_eq!(merge(&DesignerConfig::default(), &patch), config);
}

#[test]
fn stored_document_is_flat_camel_case() {
    let raw = encode_stored(&DesignerConfig::default()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["colorTheme"], json!("dark"));
    assert_eq!(v["shapeMask"], json!("plain"));
    assert_eq!(v["posterSize"], json!("M"));
    assert_eq!(v["location"]["name"], json!("New York, USA"));
}

#[test]
fn corrupt_document_is_ignored() {
    assert!(MemoryStore::with_raw("{not json").load().is_none());
}

#[test]
fn malformed_fields_are_dropped_individually() {
    let raw = json!({
        "title": "kept",
        "colorTheme": "chartreuse",
        "showGrid": "yes",
        "posterSize": "XL",
    })
    .to_string();
    let patch = MemoryStore::with_raw(raw).load().unwrap();
    assert_eq!(patch.title.as_deref(), Some("kept"));
    assert_eq!(patch.color_theme, None);
    assert_eq!(patch.show_grid, None);
    assert_eq!(
        patch.poster_size,
        Some(crate::config::poster::PosterSize::XL)
    );
}

#[test]
fn failing_store_reports_persistence_error() {
    let mut store = MemoryStore::new().failing();
    let err = store.save(&DesignerConfig::default()).unwrap_err();
    assert!(matches!(err, StarmapError::Persistence(_)));
    assert!(store.raw().is_none());
}

#[test]
fn file_store_writes_under_fixed_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("state"));
    assert!(store.load().is_none());
    assert!(!store.visited());

    let config = DesignerConfig {
        footnote: "under the stars".to_owned(),
        ..DesignerConfig::default()
    };
    store.save(&config).unwrap();
    store.mark_visited().unwrap();

    assert!(store.config_path().ends_with("starmap-designer-config.json"));
    assert!(store.visited());
    let reopened = FileStore::new(dir.path().join("state"));
    assert_eq!(
        reopened.load().unwrap().footnote.as_deref(),
        Some("under the stars")
    );
}
