use super::*;
use serde_json::json;

fn fixed_config() -> DesignerConfig {
    DesignerConfig {
        date: "2024-06-15".to_owned(),
        ..DesignerConfig::default()
    }
}

#[test]
fn defaults_are_fully_populated() {
    let c = DesignerConfig::default();
    assert_eq!(c.location.name, "New York, USA");
    assert_eq!(c.location.timezone.as_deref(), Some("America/New_York"));
    assert_eq!(c.time, "20:00");
    assert_eq!(c.color_theme, ColorTheme::Dark);
    assert_eq!(c.shape_mask, ShapeMask::Plain);
    assert!(c.show_constellations && c.show_milky_way);
    assert!(!c.show_labels && !c.show_grid && !c.show_frame);
    assert_eq!(c.poster_size, PosterSize::M);
    assert!(moment::parse_date(&c.date).is_ok());
    assert!(c.validate().is_empty());
}

#[test]
fn merge_changes_exactly_the_patched_fields() {
    let base = fixed_config();
    let patch = ConfigPatch {
        title: Some("Our Wedding Night".to_owned()),
        shape_mask: Some(ShapeMask::Heart),
        ..ConfigPatch::default()
    };
    let merged = merge(&base, &patch);

    let expected = DesignerConfig {
        title: "Our Wedding Night".to_owned(),
        shape_mask: ShapeMask::Heart,
        ..base.clone()
    };
    assert_eq!(merged, expected);
    assert_eq!(merged.location.lat.to_bits(), base.location.lat.to_bits());
}

#[test]
fn empty_patch_is_identity() {
    let base = fixed_config();
    assert_eq!(merge(&base, &ConfigPatch::default()), base);
    assert!(ConfigPatch::default().is_empty());
}

#[test]
fn location_is_replaced_wholesale() {
    let base = fixed_config();
    let patch = ConfigPatch {
        location: Some(Location::new("Current Location", 1.0, 2.0)),
        ..ConfigPatch::default()
    };
    let merged = merge(&base, &patch);
    assert_eq!(merged.location.timezone, None);
    assert_eq!(merged.location.name, "Current Location");
}

#[test]
fn patch_serializes_only_set_fields_in_camel_case() {
    let patch = ConfigPatch {
        color_theme: Some(ColorTheme::Navy),
        show_milky_way: Some(false),
        ..ConfigPatch::default()
    };
    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        json!({"colorTheme": "navy", "showMilkyWay": false})
    );
    assert_eq!(patch.touched_fields(), vec!["colorTheme", "showMilkyWay"]);
}

#[test]
fn limited_truncates_on_char_boundaries() {
    let long_title: String = "é".repeat(60);
    let patch = ConfigPatch {
        title: Some(long_title),
        footnote: Some("x".repeat(150)),
        ..ConfigPatch::default()
    }
    .limited();
    assert_eq!(patch.title.as_ref().unwrap().chars().count(), TITLE_MAX_CHARS);
    assert_eq!(
        patch.footnote.as_ref().unwrap().chars().count(),
        FOOTNOTE_MAX_CHARS
    );
    assert_eq!(truncate_chars("abc", 10), "abc");
}

#[test]
fn later_patch_wins_in_then() {
    let a = ConfigPatch {
        date: Some("2024-01-01".to_owned()),
        time: Some("10:00".to_owned()),
        ..ConfigPatch::default()
    };
    let b = ConfigPatch {
        time: Some("22:00".to_owned()),
        ..ConfigPatch::default()
    };
    let c = a.then(b);
    assert_eq!(c.date.as_deref(), Some("2024-01-01"));
    assert_eq!(c.time.as_deref(), Some("22:00"));
}

#[test]
fn lenient_decode_discards_only_corrupt_fields() {
    let value = json!({
        "colorTheme": "teal",
        "shapeMask": "hexagon",
        "location": {"name": "Paris, France", "lat": 48.8566, "lng": 2.3522},
        "showGrid": "yes",
        "title": "Hi",
        "unknownField": 42
    });
    let (patch, discarded) = ConfigPatch::from_json_lenient(&value);
    assert_eq!(patch.color_theme, Some(ColorTheme::Teal));
    assert_eq!(patch.location.as_ref().unwrap().name, "Paris, France");
    assert_eq!(patch.title.as_deref(), Some("Hi"));
    assert_eq!(patch.shape_mask, None);
    assert_eq!(patch.show_grid, None);
    assert_eq!(discarded, vec!["shapeMask".to_owned(), "showGrid".to_owned()]);
}

#[test]
fn lenient_decode_of_non_object_is_empty() {
    let (patch, discarded) = ConfigPatch::from_json_lenient(&json!([1, 2, 3]));
    assert!(patch.is_empty());
    assert_eq!(discarded, vec!["<root>".to_owned()]);
}

#[test]
fn validate_reports_out_of_range_values() {
    let c = DesignerConfig {
        location: Location::new("Nowhere", 95.0, 0.0),
        date: "2024-13-01".to_owned(),
        time: "25:00".to_owned(),
        title: "t".repeat(51),
        ..fixed_config()
    };
    let issues = c.validate();
    assert_eq!(issues.len(), 4);
    assert!(matches!(issues[0], ConfigIssue::LocationOutOfRange { .. }));
    assert_eq!(issues[3], ConfigIssue::TitleTooLong(51));
}

#[test]
fn visual_fingerprint_ignores_poster_size_only() {
    let base = fixed_config();
    let resized = DesignerConfig {
        poster_size: PosterSize::XL,
        ..base.clone()
    };
    assert_eq!(base.visual_fingerprint(), resized.visual_fingerprint());

    let framed = DesignerConfig {
        show_frame: true,
        ..base.clone()
    };
    assert_ne!(base.visual_fingerprint(), framed.visual_fingerprint());
}

#[test]
fn full_config_json_round_trip_uses_camel_case() {
    let c = fixed_config();
    let v = serde_json::to_value(&c).unwrap();
    assert_eq!(v["colorTheme"], json!("dark"));
    assert_eq!(v["posterSize"], json!("M"));
    assert_eq!(v["showMilkyWay"], json!(true));
    let back: DesignerConfig = serde_json::from_value(v).unwrap();
    assert_eq!(back, c);
    assert_eq!(merge(&DesignerConfig::default(), &ConfigPatch::from(&c)), c);
}
