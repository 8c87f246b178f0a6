use super::*;
use crate::config::poster::PosterSize;
use crate::config::theme::ShapeMask;
use crate::wizard::steps::{DesignPatch, SizePatch, TextPatch};

fn wizard() -> Wizard {
    Wizard::new(DesignerConfig {
        date: "2024-06-15".to_owned(),
        ..DesignerConfig::default()
    })
}

#[test]
fn back_at_first_and_next_at_last_are_noops() {
    let mut w = wizard();
    assert!(!w.back());
    assert_eq!(w.step(), WizardStep::Moment);

    for _ in 0..3 {
        assert!(w.next());
    }
    assert_eq!(w.step(), WizardStep::Size);
    assert!(!w.next());
    assert_eq!(w.step(), WizardStep::Size);
    assert_eq!(w.progress_label(), "Step 4 of 4");
}

#[test]
fn go_to_is_limited_to_the_furthest_step_reached() {
    let mut w = wizard();
    assert!(w.go_to(WizardStep::Text).is_err());
    assert_eq!(w.step(), WizardStep::Moment);

    w.next();
    w.next();
    w.back();
    w.back();
    assert_eq!(w.furthest_reached(), WizardStep::Text);
    w.go_to(WizardStep::Text).unwrap();
    assert_eq!(w.step(), WizardStep::Text);

    let err = w.go_to(WizardStep::Size).unwrap_err();
    assert!(matches!(err, StarmapError::Navigation(_)));
    assert_eq!(w.step(), WizardStep::Text);
}

#[test]
fn step_states_mark_active_completed_and_clickable() {
    let mut w = wizard();
    w.next();
    let states = w.step_states();
    assert_eq!(states.len(), 4);
    assert!(states[0].completed && states[0].clickable && !states[0].active);
    assert!(states[1].active && states[1].clickable && !states[1].completed);
    assert!(!states[2].clickable && !states[3].clickable);
}

#[test]
fn apply_rejects_patches_from_other_steps() {
    let mut w = wizard();
    let before = w.config().clone();
    let err = w.apply(DesignPatch::shape(ShapeMask::Heart)).unwrap_err();
    assert!(matches!(err, StarmapError::Navigation(_)));
    assert_eq!(w.config(), &before);

    w.next();
    let applied = w.apply(DesignPatch::shape(ShapeMask::Heart)).unwrap();
    assert_eq!(applied.touched_fields(), vec!["shapeMask"]);
    assert_eq!(w.config().shape_mask, ShapeMask::Heart);
}

#[test]
fn text_patches_are_truncated_on_apply() {
    let mut w = wizard();
    w.next();
    w.next();
    let long = "x".repeat(80);
    w.apply(TextPatch::title(&long)).unwrap();
    assert_eq!(w.config().title.chars().count(), 50);
}

#[test]
fn reset_requires_confirmation() {
    let mut w = wizard();
    w.next();
    w.apply(DesignPatch::shape(ShapeMask::Circle)).unwrap();

    assert!(!w.reset(|| false));
    assert_eq!(w.step(), WizardStep::Design);
    assert_eq!(w.config().shape_mask, ShapeMask::Circle);

    assert!(w.reset(|| true));
    assert_eq!(w.step(), WizardStep::Moment);
    assert_eq!(w.furthest_reached(), WizardStep::Moment);
    assert_eq!(w.config().shape_mask, ShapeMask::Plain);
}

#[test]
fn checkout_only_from_size_step() {
    let mut w = wizard();
    assert!(w.checkout().is_err());
    while w.next() {}
    w.apply(SizePatch::size(PosterSize::XL)).unwrap();
    let summary = w.checkout().unwrap();
    assert_eq!(summary.size, PosterSize::XL);
    assert_eq!(summary.price_usd, 119);
    assert_eq!(summary.size_label, "24\" × 30\"");
    assert_eq!(summary.design.poster_size, PosterSize::XL);
}

#[test]
fn seed_merges_without_moving() {
    let mut w = wizard();
    w.seed(ConfigPatch {
        title: Some("Seeded".to_owned()),
        ..ConfigPatch::default()
    });
    assert_eq!(w.config().title, "Seeded");
    assert_eq!(w.step(), WizardStep::Moment);
}
