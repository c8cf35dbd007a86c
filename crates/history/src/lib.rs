//! Per-entity sample history for live robot plots.
//!
//! Each tracked entity keeps five parallel channels (position, heading,
//! right wheel speed, left wheel speed, time) that always grow together.

pub mod entity;
pub mod retention;

pub use entity::{Pose, Sample, TrackedEntity};
pub use retention::Retention;
