use super::*;

fn base() -> Url {
    parse_base("https://example.com/designer?stale=1").unwrap()
}

#[test]
fn round_trip_carries_the_shared_fields() {
    let config = DesignerConfig {
        location: Location::new("London, UK", 51.5074, -0.1278),
        date: "2024-06-15".to_owned(),
        time: "22:00".to_owned(),
        color_theme: ColorTheme::Rose,
        shape_mask: ShapeMask::Heart,
        title: "Us & the stars ✨".to_owned(),
        footnote: "50% chance of clouds".to_owned(),
        ..DesignerConfig::default()
    };
    let url = encode_shareable(&base(), &config);
    assert!(!url.as_str().contains("stale"));

    let patch = decode_from_url(&url);
    let loc = patch.location.clone().unwrap();
    assert_eq!(loc.name, "London, UK");
    assert_eq!(loc.lat, 51.5074);
    assert_eq!(loc.lng, -0.1278);
    assert_eq!(patch.date.as_deref(), Some("2024-06-15"));
    assert_eq!(patch.time.as_deref(), Some("22:00"));
    assert_eq!(patch.color_theme, Some(ColorTheme::Rose));
    assert_eq!(patch.shape_mask, Some(ShapeMask::Heart));
    assert_eq!(patch.title.as_deref(), Some("Us & the stars ✨"));
    assert_eq!(patch.footnote.as_deref(), Some("50% chance of clouds"));
    assert_eq!(patch.poster_size, None);
}

#[test]
fn empty_text_is_not_encoded() {
    let url = encode_shareable(&base(), &DesignerConfig::default());
    assert!(url.query_pairs().all(|(k, _)| k != "title" && k != "footnote"));
    assert!(has_lat(&url));
}

#[test]
fn location_needs_both_coordinates() {
    let url = Url::parse("https://x.test/?lat=10&location=Nowhere").unwrap();
    assert!(decode_from_url(&url).location.is_none());

    let url = Url::parse("https://x.test/?lat=10&lng=abc").unwrap();
    assert!(decode_from_url(&url).location.is_none());

    let url = Url::parse("https://x.test/?lat=10&lng=20").unwrap();
    let loc = decode_from_url(&url).location.unwrap();
    assert_eq!(loc.name, CUSTOM_LOCATION_NAME);
}

#[test]
fn unknown_and_invalid_params_are_ignored() {
    let url = Url::parse("https://x.test/?theme=neon&shape=star&utm=1&time=21:00").unwrap();
    let patch = decode_from_url(&url);
    assert_eq!(patch.color_theme, None);
    assert_eq!(patch.shape_mask, None);
    assert_eq!(patch.touched_fields(), vec!["time"]);
}

#[test]
fn decoded_text_is_limited() {
    let long = "t".repeat(70);
    let url = Url::parse(&format!("https://x.test/?title={long}")).unwrap();
    assert_eq!(decode_from_url(&url).title.unwrap().len(), 50);
}

#[test]
fn payload_uses_fixed_share_text() {
    let p = share_payload(&base(), &DesignerConfig::default());
    assert_eq!(p.title, "My Star Map Design");
    assert_eq!(p.text, "Check out my custom star map!");
    assert!(has_lat(&p.url));
    assert!(parse_base("not a url").is_err());
}

#[test]
fn default_design_survives_a_link_unchanged() {
    let design = DesignerConfig::default();
    let url = encode_shareable(&base(), &design);
    assert!(url.query_pairs().any(|(k, v)| k == "tz" && v == "America/New_York"));

    let reopened = crate::config::model::merge(&design, &decode_from_url(&url));
    assert_eq!(reopened.location, design.location);
    assert_eq!(reopened, design);
}

#[test]
fn timezone_is_dropped_without_coordinates() {
    let url = Url::parse("https://x.test/?tz=Europe/Paris&location=Paris").unwrap();
    assert!(decode_from_url(&url).location.is_none());

    let url = Url::parse("https://x.test/?lat=1&lng=2&tz=").unwrap();
    assert_eq!(decode_from_url(&url).location.unwrap().timezone, None);
}
