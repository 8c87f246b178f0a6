use super::*;

fn config() -> DesignerConfig {
    DesignerConfig {
        location: Location::new("London, UK", 51.5074, -0.1278),
        date: "2024-06-15".to_owned(),
        time: "21:30".to_owned(),
        ..DesignerConfig::default()
    }
}

#[test]
fn city_catalogue_and_search() {
    let cities = popular_cities();
    assert_eq!(cities.len(), 8);
    assert_eq!(cities[3].name, "Tokyo, Japan");
    assert_eq!(cities[3].timezone.as_deref(), Some("Asia/Tokyo"));

    let hits = search_cities("  LON ");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "London, UK");
    assert_eq!(search_cities("usa").len(), 2);
    assert!(search_cities("atlantis").is_empty());
}

#[test]
fn detected_position_is_named_current_location() {
    let StepPatch::Moment(p) = MomentPatch::detected_position(10.5, 20.25) else {
        panic!("wrong step");
    };
    let loc = p.location.unwrap();
    assert_eq!(loc.name, CURRENT_LOCATION_NAME);
    assert_eq!((loc.lat, loc.lng), (10.5, 20.25));
    assert_eq!(coordinates_label(&loc), "10.5000°, 20.2500°");
}

#[test]
fn patches_only_touch_their_own_step() {
    let patches = [
        MomentPatch::date("2020-01-01"),
        DesignPatch::overlay(Overlay::Grid, true),
        TextPatch::title("t"),
        SizePatch::frame(true),
    ];
    for patch in patches {
        let step = patch.step();
        let cp = patch.into_config_patch();
        for other in WizardStep::ALL {
            assert_eq!(cp.touches(other), other == step, "{step:?} vs {other:?}");
        }
    }
}

#[test]
fn overlay_toggle_sets_one_field() {
    let cp = DesignPatch::overlay(Overlay::MilkyWay, false).into_config_patch();
    assert_eq!(cp.touched_fields(), vec!["showMilkyWay"]);
    assert_eq!(cp.show_milky_way, Some(false));
    assert!(Overlay::Constellations.is_on(&config()));
    assert_eq!(Overlay::MilkyWay.label(), "Milky Way");
}

#[test]
fn theme_and_shape_options_mark_selection() {
    let c = config();
    let themes = theme_options(&c);
    assert_eq!(themes.len(), 7);
    let selected: Vec<_> = themes.iter().filter(|t| t.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].theme, ColorTheme::Dark);

    let shapes = shape_options(&c);
    assert_eq!(shapes.len(), 3);
    assert!(shapes[0].selected);
}

#[test]
fn default_footnote_uses_long_date() {
    assert_eq!(
        default_footnote(&config()),
        "London, UK • June 15, 2024 • 21:30"
    );
}

#[test]
fn presets_follow_the_location() {
    let presets = text_presets(&config());
    let titles: Vec<_> = presets.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Our Wedding Night", "The Night We Met", "A Moment in Time"]
    );
    assert_eq!(presets[0].footnote, "London, UK • June 15, 2024");
    assert_eq!(presets[1].footnote, "Where it all began ✨");
    assert_eq!(presets[2].footnote, "Stars above London");
}

#[test]
fn footnote_setter_truncates_by_chars() {
    let StepPatch::Text(p) = TextPatch::footnote("é".repeat(120)) else {
        panic!("wrong step");
    };
    assert_eq!(p.footnote.unwrap().chars().count(), FOOTNOTE_MAX_CHARS);
    assert_eq!(char_counter("abc", 50), "3/50 characters");
}

#[test]
fn size_options_hide_popular_badge_when_selected() {
    let mut c = config();
    let opts = size_options(&c);
    assert_eq!(opts.len(), 4);
    assert!(opts[1].selected && !opts[1].popular_badge);
    assert_eq!(opts[0].price_usd, 49);

    c.poster_size = PosterSize::L;
    let opts = size_options(&c);
    assert!(opts[1].popular_badge);
    assert!(opts[2].selected);
}
