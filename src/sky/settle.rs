use std::time::Duration;

use crate::sky::renderer::{RenderPoll, SkyChart, SkyChartRenderer};

/// Bounded readiness polling for the sky-chart renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Polls before giving up. With `0` the renderer is never polled.
    pub max_polls: u32,
    /// Wait between polls.
    pub interval: Duration,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            max_polls: 20,
            interval: Duration::from_millis(15),
        }
    }
}

impl SettlePolicy {
    /// Defaults overridden by `STARMAP_SETTLE_POLLS` and `STARMAP_SETTLE_INTERVAL_MS`.
    /// Values that do not parse are ignored.
    pub fn from_env() -> Self {
        let mut policy = Self::default();
        if let Some(n) = env_u64("STARMAP_SETTLE_POLLS") {
            policy.max_polls = u32::try_from(n).unwrap_or(u32::MAX);
        }
        if let Some(ms) = env_u64("STARMAP_SETTLE_INTERVAL_MS") {
            policy.interval = Duration::from_millis(ms);
        }
        policy
    }

    /// No waiting between polls.
    pub fn immediate(max_polls: u32) -> Self {
        Self {
            max_polls,
            interval: Duration::ZERO,
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}

/// How waiting for the renderer ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settled {
    /// Chart ready after `polls` checks.
    Ready {
        /// The chart.
        chart: SkyChart,
        /// Checks spent.
        polls: u32,
    },
    /// Renderer reported a failure.
    Failed(String),
    /// Poll budget exhausted.
    TimedOut {
        /// Checks spent.
        polls: u32,
    },
}

/// Poll `renderer` until it is ready, fails, or the budget runs out. `sleep` is
/// called between polls with the policy interval.
pub fn wait_ready(
    renderer: &mut dyn SkyChartRenderer,
    policy: SettlePolicy,
    mut sleep: impl FnMut(Duration),
) -> Settled {
    for i in 0..policy.max_polls {
        if i > 0 && !policy.interval.is_zero() {
            sleep(policy.interval);
        }
        match renderer.poll() {
            RenderPoll::Pending => continue,
            RenderPoll::Ready(chart) => {
                return Settled::Ready {
                    chart,
                    polls: i + 1,
                };
            }
            RenderPoll::Failed(msg) => return Settled::Failed(msg),
        }
    }
    tracing::warn!(polls = policy.max_polls, "sky chart renderer did not settle");
    Settled::TimedOut {
        polls: policy.max_polls,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sky/settle.rs"]
mod tests;
