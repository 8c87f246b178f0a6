use super::*;
use serde_json::json;

#[test]
fn dark_palette_matches_table() {
    let p = ColorTheme::Dark.palette();
    assert_eq!(p.bg.to_hex(), "#000000");
    assert_eq!(p.fg.to_hex(), "#ffffff");
    assert_eq!(p.accent.to_hex(), "#ffc857");
    assert_eq!(p.label, "Dark");
}

#[test]
fn light_is_the_only_theme_with_dark_ink() {
    for theme in ColorTheme::ALL {
        let fg = theme.palette().fg;
        if theme == ColorTheme::Light {
            assert_eq!(fg.to_hex(), "#000000");
        } else {
            assert_eq!(fg.to_hex(), "#ffffff");
        }
    }
}

#[test]
fn names_round_trip() {
    for theme in ColorTheme::ALL {
        assert_eq!(ColorTheme::from_name(theme.as_str()), Some(theme));
        assert_eq!(serde_json::to_value(theme).unwrap(), json!(theme.as_str()));
    }
    for shape in ShapeMask::ALL {
        assert_eq!(ShapeMask::from_name(shape.as_str()), Some(shape));
        assert_eq!(serde_json::to_value(shape).unwrap(), json!(shape.as_str()));
    }
    assert_eq!(ColorTheme::from_name("Dark"), None);
    assert_eq!(ShapeMask::from_name("star"), None);
}
