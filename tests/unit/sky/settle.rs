use super::*;
use crate::sky::renderer::StaticChartRenderer;

fn chart() -> SkyChart {
    SkyChart::Svg(b"<svg/>".to_vec())
}

#[test]
fn ready_after_pending_polls() {
    let mut r = StaticChartRenderer::new(chart()).with_pending_polls(3);
    r.redraw();
    let mut sleeps = Vec::new();
    let out = wait_ready(&mut r, SettlePolicy::default(), |d| sleeps.push(d));
    assert_eq!(
        out,
        Settled::Ready {
            chart: chart(),
            polls: 4
        }
    );
    assert_eq!(sleeps.len(), 3);
    assert!(sleeps.iter().all(|d| *d == SettlePolicy::default().interval));
}

#[test]
fn budget_exhaustion_times_out() {
    let mut r = StaticChartRenderer::never_ready();
    r.redraw();
    let out = wait_ready(&mut r, SettlePolicy::immediate(5), |_| {
        panic!("immediate policy never sleeps")
    });
    assert_eq!(out, Settled::TimedOut { polls: 5 });
}

#[test]
fn zero_budget_never_polls() {
    let mut r = StaticChartRenderer::new(chart());
    let out = wait_ready(&mut r, SettlePolicy::immediate(0), |_| {});
    assert_eq!(out, Settled::TimedOut { polls: 0 });
}
