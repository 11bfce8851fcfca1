//! Derived aggregate figures for display.

use serde::Serialize;

/// Snapshot of the tracker's aggregate figures.
///
/// Pure data plus arithmetic; no side effects. `total` is the net balance
/// (meals minus workouts), maintained by the tracker; `consumed` and
/// `burned` are the per-collection sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub limit: i64,
    pub total: i64,
    pub consumed: i64,
    pub burned: i64,
}

impl Summary {
    /// Calories left before the daily limit. Non-positive means over limit.
    #[must_use]
    pub const fn remaining(&self) -> i64 {
        self.limit - self.total
    }

    /// Whether the limit has been reached or exceeded.
    #[must_use]
    pub const fn over_limit(&self) -> bool {
        self.remaining() <= 0
    }

    /// Ratio of total to limit, unclamped.
    ///
    /// Degenerate with a zero limit; callers wanting a displayable value
    /// should use [`progress_clamped`](Self::progress_clamped).
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "calorie counts are far below f64 integer precision"
    )]
    pub fn progress(&self) -> f64 {
        self.total as f64 / self.limit as f64
    }

    /// Ratio of total to limit, clamped to `[0, 1]` for display.
    #[must_use]
    pub fn progress_clamped(&self) -> f64 {
        let ratio = self.progress();
        if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) }
    }
}
