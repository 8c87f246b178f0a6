use super::*;
use crate::config::theme::{ColorTheme, ShapeMask};

const RED_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

fn red_chart() -> SkyChart {
    SkyChart::Svg(RED_SVG.to_vec())
}

fn compositor() -> CpuCompositor {
    CpuCompositor::new(CompositorOpts {
        font: FontSource::Disabled,
        ..CompositorOpts::default()
    })
}

fn config() -> DesignerConfig {
    DesignerConfig {
        date: "2024-06-15".to_owned(),
        ..DesignerConfig::default()
    }
}

fn compose(c: &DesignerConfig, canvas: Canvas) -> RasterRGBA {
    compositor()
        .compose(&red_chart(), c, canvas)
        .unwrap()
        .into_raster()
        .unwrap()
}

#[test]
fn zero_canvas_is_skipped() {
    let out = compositor()
        .compose(&red_chart(), &config(), Canvas::new(0, 10))
        .unwrap();
    assert_eq!(out, CompositeOutcome::Skipped);
    assert!(out.raster().is_none());
}

#[test]
fn plain_keeps_corners() {
    let r = compose(&config(), Canvas::square(64));
    assert!(r.premultiplied);
    assert_eq!(r.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(r.pixel(63, 63), Some([255, 0, 0, 255]));
    assert_eq!(r.pixel(64, 0), None);
}

#[test]
fn circle_clears_outside() {
    let c = DesignerConfig {
        shape_mask: ShapeMask::Circle,
        ..config()
    };
    let r = compose(&c, Canvas::square(100));
    assert_eq!(r.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(r.pixel(99, 0).unwrap()[3], 0);
    assert_eq!(r.pixel(50, 50), Some([255, 0, 0, 255]));
    assert_eq!(r.pixel(50, 2).unwrap()[3], 0);
}

#[test]
fn heart_clears_outside() {
    let c = DesignerConfig {
        shape_mask: ShapeMask::Heart,
        ..config()
    };
    let r = compose(&c, Canvas::square(100));
    assert_eq!(r.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(r.pixel(50, 40).unwrap()[3], 0);
    assert_eq!(r.pixel(50, 67), Some([255, 0, 0, 255]));
}

#[test]
fn frame_strokes_the_border() {
    let c = DesignerConfig {
        show_frame: true,
        color_theme: ColorTheme::Dark,
        ..config()
    };
    let r = compose(&c, Canvas::square(100));
    assert_eq!(r.pixel(2, 50), Some([255, 255, 255, 255]));
    assert_eq!(r.pixel(50, 97), Some([255, 255, 255, 255]));
    assert_eq!(r.pixel(6, 50), Some([0, 0, 0, 255]));
    assert_eq!(r.pixel(50, 50), Some([255, 0, 0, 255]));
}

#[test]
fn composing_is_deterministic() {
    let c = DesignerConfig {
        shape_mask: ShapeMask::Heart,
        show_frame: true,
        ..config()
    };
    let mut comp = compositor();
    let a = comp.compose(&red_chart(), &c, Canvas::new(120, 90)).unwrap();
    let b = comp.compose(&red_chart(), &c, Canvas::new(120, 90)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn undecodable_chart_fails_the_run() {
    let err = compositor()
        .compose(&SkyChart::Svg(b"nope".to_vec()), &config(), Canvas::square(10))
        .unwrap_err();
    assert!(matches!(err, StarmapError::Render(_)));
}

#[test]
fn placeholder_paints_background_only() {
    let c = DesignerConfig {
        color_theme: ColorTheme::Navy,
        ..config()
    };
    let r = compositor()
        .compose_placeholder(&c, Canvas::square(16))
        .unwrap()
        .into_raster()
        .unwrap();
    assert_eq!(r.pixel(8, 8), Some([0x0b, 0x13, 0x2b, 255]));
}

#[test]
fn disabled_font_reports_no_text() {
    assert!(!compositor().has_font().unwrap());
}

#[test]
fn png_export_uses_straight_alpha() {
    let r = RasterRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(r.to_straight().data, vec![128, 0, 0, 128]);
    let png = encode_png(&r).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}
