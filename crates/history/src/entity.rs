use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::Retention;

/// Planar pose of an entity. `theta` is in radians, by convention in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }
}

/// One tick of observed state for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    /// Heading (rad)
    pub theta: f64,
    /// Simulation time (s), non-decreasing between ticks
    pub t: f64,
    /// Right wheel angular speed (rad/s)
    pub right_speed: f64,
    /// Left wheel angular speed (rad/s)
    pub left_speed: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, theta: f64, t: f64, right_speed: f64, left_speed: f64) -> Self {
        Self { x, y, theta, t, right_speed, left_speed }
    }
}

/// Recorded history of one entity.
///
/// All channels share one length at every observable point: `append` pushes to
/// each of them and trims them together. Values are stored as given, so NaN or
/// infinite inputs end up in the history untouched.
#[derive(Debug, Clone)]
pub struct TrackedEntity {
    name: String,
    color: String,
    positions: VecDeque<[f64; 2]>,
    headings: VecDeque<f64>,
    right_speeds: VecDeque<f64>,
    left_speeds: VecDeque<f64>,
    times: VecDeque<f64>,
    retention: Retention,
}

impl TrackedEntity {
    /// Create an entity seeded with its initial pose at time zero and zero wheel speeds.
    pub fn new(name: impl Into<String>, color: impl Into<String>, pose: Pose) -> Self {
        let mut entity = Self {
            name: name.into(),
            color: color.into(),
            positions: VecDeque::new(),
            headings: VecDeque::new(),
            right_speeds: VecDeque::new(),
            left_speeds: VecDeque::new(),
            times: VecDeque::new(),
            retention: Retention::Unbounded,
        };
        entity.push(Sample::new(pose.x, pose.y, pose.theta, 0.0, 0.0, 0.0));
        entity
    }

    /// Replace the seeded wheel speeds
    pub fn with_initial_speeds(mut self, right_speed: f64, left_speed: f64) -> Self {
        if let (Some(r), Some(l)) = (self.right_speeds.front_mut(), self.left_speeds.front_mut()) {
            *r = right_speed;
            *l = left_speed;
        }
        self
    }

    /// Set the retention policy, trimming immediately if the history is already longer.
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.set_retention(retention);
        self
    }

    pub fn set_retention(&mut self, retention: Retention) {
        self.retention = retention;
        self.trim_to_capacity();
    }

    /// Append one sample to every channel.
    pub fn append(&mut self, sample: Sample) {
        self.push(sample);
        self.trim_to_capacity();
    }

    fn push(&mut self, sample: Sample) {
        self.positions.push_back([sample.x, sample.y]);
        self.headings.push_back(sample.theta);
        self.right_speeds.push_back(sample.right_speed);
        self.left_speeds.push_back(sample.left_speed);
        self.times.push_back(sample.t);
    }

    fn trim_to_capacity(&mut self) {
        let Some(capacity) = self.retention.capacity() else {
            return;
        };
        while self.times.len() > capacity {
            self.positions.pop_front();
            self.headings.pop_front();
            self.right_speeds.pop_front();
            self.left_speeds.pop_front();
            self.times.pop_front();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colour tag given at registration, unparsed
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Number of retained samples (identical across channels)
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn positions(&self) -> &VecDeque<[f64; 2]> {
        &self.positions
    }

    pub fn headings(&self) -> &VecDeque<f64> {
        &self.headings
    }

    pub fn right_speeds(&self) -> &VecDeque<f64> {
        &self.right_speeds
    }

    pub fn left_speeds(&self) -> &VecDeque<f64> {
        &self.left_speeds
    }

    pub fn times(&self) -> &VecDeque<f64> {
        &self.times
    }

    /// Most recent sample across all channels
    pub fn latest(&self) -> Option<Sample> {
        let [x, y] = *self.positions.back()?;
        Some(Sample {
            x,
            y,
            theta: *self.headings.back()?,
            t: *self.times.back()?,
            right_speed: *self.right_speeds.back()?,
            left_speed: *self.left_speeds.back()?,
        })
    }

    /// Pair the time channel with another channel as plot points.
    pub fn against_time<'a>(&'a self, channel: &'a VecDeque<f64>) -> impl Iterator<Item = [f64; 2]> + 'a {
        self.times.iter().copied().zip(channel.iter().copied()).map(|(t, v)| [t, v])
    }

    fn channel_lengths(&self) -> [usize; 5] {
        [
            self.positions.len(),
            self.headings.len(),
            self.right_speeds.len(),
            self.left_speeds.len(),
            self.times.len(),
        ]
    }

    /// True when all five channels have the same length
    pub fn is_consistent(&self) -> bool {
        let lengths = self.channel_lengths();
        lengths.iter().all(|&l| l == lengths[0])
    }
}
