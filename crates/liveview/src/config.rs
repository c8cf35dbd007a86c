//! Live view configuration
//!
//! Defaults reproduce the classic layout: a fixed ±1 m trajectory window,
//! ±10 rad/s for wheel speeds, 0..2π for heading and a 50 ms redraw pause.

use std::f64::consts::TAU;
use std::time::Duration;

use history::Retention;
use serde::{Deserialize, Serialize};

/// Closed interval on one plot axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Visible rectangle of a panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Bounds {
    pub const fn new(x: AxisRange, y: AxisRange) -> Self {
        Self { x, y }
    }
}

/// What `register_entity` does when the name is already tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `ViewError::DuplicateRegistration`, keeping the existing history
    #[default]
    Reject,
    /// Discard the existing history and start over from the new descriptor
    Replace,
}

/// Configuration for a [`crate::LiveView`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Fixed window re-applied to the trajectory panel on every sample
    pub trajectory_bounds: Bounds,
    /// Vertical range of the wheel speed panel (rad/s)
    pub speed_range: AxisRange,
    /// Vertical range of the heading panel (rad)
    pub heading_range: AxisRange,
    /// Time axis of the heading and speed panels before any positive timestamp arrives
    pub initial_time_window: AxisRange,
    /// Pause after presenting a frame (ms)
    pub refresh_pause_ms: u64,
    /// Per-entity history retention
    pub retention: Retention,
    pub duplicate_policy: DuplicatePolicy,
    /// Colour tag of the latest-position marker
    pub marker_color: String,
    /// Length of the direction arrow in trajectory units (m)
    pub indicator_length: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            trajectory_bounds: Bounds::new(AxisRange::new(-1.0, 1.0), AxisRange::new(-1.0, 1.0)),
            speed_range: AxisRange::new(-10.0, 10.0),
            heading_range: AxisRange::new(0.0, TAU),
            initial_time_window: AxisRange::new(0.0, 50.0),
            refresh_pause_ms: 50,
            retention: Retention::Unbounded,
            duplicate_policy: DuplicatePolicy::Reject,
            marker_color: "g".to_string(),
            indicator_length: 0.1,
        }
    }
}

impl ViewConfig {
    pub fn refresh_pause(&self) -> Duration {
        Duration::from_millis(self.refresh_pause_ms)
    }

    /// Set the pause after each refresh, saturating at `u64::MAX` milliseconds
    pub fn with_refresh_pause(mut self, pause: Duration) -> Self {
        self.refresh_pause_ms = u64::try_from(pause.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_trajectory_bounds(mut self, bounds: Bounds) -> Self {
        self.trajectory_bounds = bounds;
        self
    }
}
