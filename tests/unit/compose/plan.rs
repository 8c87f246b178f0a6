use super::*;
use crate::config::theme::ColorTheme;

fn config() -> DesignerConfig {
    DesignerConfig {
        date: "2024-06-15".to_owned(),
        time: "22:00".to_owned(),
        ..DesignerConfig::default()
    }
}

fn plan(c: &DesignerConfig, canvas: Canvas) -> CompositePlan {
    compile_plan(c, canvas, &TextLayoutOpts::default())
}

#[test]
fn empty_canvas_has_no_ops() {
    assert!(plan(&config(), Canvas::new(0, 300)).is_empty());
    assert!(plan(&config(), Canvas::new(300, 0)).is_empty());
}

#[test]
fn empty_text_leaves_only_the_caption() {
    let p = plan(&config(), Canvas::new(400, 500));
    let texts: Vec<_> = p.text_ops().collect();
    assert_eq!(texts.len(), 1);
    let caption = texts[0];
    assert_eq!(caption.role, TextRole::Caption);
    assert_eq!(caption.text, "June 15, 2024, 22:00");
    assert_eq!(caption.center, Point::new(200.0, 250.0 + 175.0));
    assert_eq!(caption.size_px, 14.0);
    assert_eq!(caption.opacity, 0.9);
}

#[test]
fn ops_follow_the_stage_order() {
    let c = DesignerConfig {
        title: "T".to_owned(),
        footnote: "F".to_owned(),
        shape_mask: ShapeMask::Circle,
        show_frame: true,
        color_theme: ColorTheme::Light,
        ..config()
    };
    let p = plan(&c, Canvas::new(300, 400));
    let kinds: Vec<_> = p
        .ops
        .iter()
        .map(|op| match op {
            PaintOp::Fill(_) => "fill",
            PaintOp::Chart => "chart",
            PaintOp::Mask { .. } => "mask",
            PaintOp::Text(t) => match t.role {
                TextRole::Title => "title",
                TextRole::Caption => "caption",
                TextRole::Footnote => "footnote",
            },
            PaintOp::StrokeRect { .. } => "stroke",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["fill", "chart", "mask", "title", "caption", "footnote", "stroke", "stroke"]
    );

    let pal = ColorTheme::Light.palette();
    assert_eq!(p.ops[0], PaintOp::Fill(pal.bg));
    let title = p.text_ops().next().unwrap();
    assert!(title.bold);
    assert_eq!(title.center, Point::new(150.0, 40.0));
    assert_eq!(title.size_px, 24.0);
    assert_eq!(title.color, pal.fg);
    let foot = p.text_ops().last().unwrap();
    assert_eq!(foot.center.y, 360.0);
    assert_eq!(foot.opacity, 0.8);

    assert_eq!(
        p.ops[6],
        PaintOp::StrokeRect {
            rect: Rect::new(4.0, 4.0, 296.0, 396.0),
            width: 8.0,
            color: pal.fg,
        }
    );
    assert_eq!(
        p.ops[7],
        PaintOp::StrokeRect {
            rect: Rect::new(6.0, 6.0, 294.0, 394.0),
            width: 2.0,
            color: pal.bg,
        }
    );
}

#[test]
fn without_chart_drops_only_the_chart() {
    let p = plan(&config(), Canvas::square(50));
    let n = p.ops.len();
    let q = p.without_chart();
    assert_eq!(q.ops.len(), n - 1);
    assert!(!q.ops.contains(&PaintOp::Chart));
}
