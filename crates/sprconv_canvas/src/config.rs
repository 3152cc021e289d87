use std::time::Duration;

use glam::UVec2;
use serde::{Deserialize, Serialize};

/// Runtime tunables of an image panel. The drawing geometry is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub min_width: u32,
    pub min_height: u32,
    /// How long a paint pass waits for the image guard before deferring.
    pub lock_timeout_ms: u64,
    pub retry: RetryPolicy,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_width: 64,
            min_height: 64,
            lock_timeout_ms: 1000,
            retry: RetryPolicy::default(),
        }
    }
}

impl PanelConfig {
    pub fn min_size(&self) -> UVec2 {
        UVec2::new(self.min_width, self.min_height)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// What a paint pass asks for after it failed to acquire the image guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Repaint right away on every deferral.
    Immediate,
    /// Repaint right away on the first deferral, then wait `initial_ms`,
    /// doubling per consecutive deferral up to `max_ms`.
    Backoff { initial_ms: u64, max_ms: u64 },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::Backoff {
            initial_ms: 16,
            max_ms: 500,
        }
    }
}

impl RetryPolicy {
    /// Delay before the repaint following the `deferrals`-th consecutive
    /// deferral (1-based).
    pub fn delay(&self, deferrals: u32) -> Duration {
        match *self {
            RetryPolicy::Immediate => Duration::ZERO,
            RetryPolicy::Backoff { initial_ms, max_ms } => {
                if deferrals <= 1 {
                    return Duration::ZERO;
                }
                let factor = 1u64.checked_shl(deferrals - 2).unwrap_or(u64::MAX);
                Duration::from_millis(initial_ms.saturating_mul(factor).min(max_ms))
            }
        }
    }
}
