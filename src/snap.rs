//! Drop-position snapping for drag-and-drop scheduling.
//!
//! All values are minutes from midnight.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default grid step in minutes.
pub const DEFAULT_GRID_MINUTES: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Grid step in minutes.
    pub grid_minutes: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            grid_minutes: DEFAULT_GRID_MINUTES,
        }
    }
}

impl SnapConfig {
    pub fn new(grid_minutes: f64) -> Result<Self, Error> {
        if !grid_minutes.is_finite() || grid_minutes <= 0.0 {
            return Err(Error::InvalidGrid(grid_minutes));
        }
        Ok(Self { grid_minutes })
    }

    /// Snap `raw_minutes` to the grid inside the gap `[gap_start, gap_end]`.
    ///
    /// Returns `None` when no grid-aligned start lets an item of
    /// `item_duration` minutes fit in the gap, or when the duration is
    /// negative. Halfway positions round up to the later grid line.
    pub fn snap(&self, raw_minutes: f64, item_duration: f64, gap_start: f64, gap_end: f64) -> Option<f64> {
        let grid = self.grid_minutes;
        if !(grid.is_finite() && grid > 0.0) {
            return None;
        }
        if ![raw_minutes, item_duration, gap_start, gap_end]
            .iter()
            .all(|value| value.is_finite())
        {
            return None;
        }
        if item_duration < 0.0 {
            return None;
        }

        let earliest_start = (gap_start / grid).ceil() * grid;
        let latest_start = ((gap_end - item_duration) / grid).floor() * grid;
        if earliest_start > latest_start {
            return None;
        }

        let snapped = (raw_minutes / grid).round() * grid;
        Some(snapped.max(earliest_start).min(latest_start))
    }
}

/// Snap to the default 15 minute grid.
pub fn snap_to_grid(raw_minutes: f64, item_duration: f64, gap_start: f64, gap_end: f64) -> Option<f64> {
    SnapConfig::default().snap(raw_minutes, item_duration, gap_start, gap_end)
}
