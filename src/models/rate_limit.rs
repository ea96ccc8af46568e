//! Fixed-window request counter.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Requests counted within `[window_start, window_end)`, in epoch milliseconds.
///
/// Windows are fixed-size and aligned to wall-clock boundaries; a request
/// outside the window belongs to a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub count: u32,
    pub window_start: i64,
    pub window_end: i64,
}

impl RateLimit {
    /// Empty counter for the window of `window_ms` containing `now_ms`.
    ///
    /// Returns `None` for a non-positive window size, or when the window end
    /// does not fit in an `i64`.
    pub fn window_for(now_ms: i64, window_ms: i64) -> Option<Self> {
        if window_ms <= 0 {
            return None;
        }
        let window_start = now_ms.checked_sub(now_ms.rem_euclid(window_ms))?;
        Some(Self {
            count: 0,
            window_start,
            window_end: window_start.checked_add(window_ms)?,
        })
    }

    pub fn contains(&self, timestamp_ms: i64) -> bool {
        (self.window_start..self.window_end).contains(&timestamp_ms)
    }

    /// Whether `limit` requests have already been counted in this window.
    pub fn is_exhausted(&self, limit: u32) -> bool {
        self.count >= limit
    }
}
