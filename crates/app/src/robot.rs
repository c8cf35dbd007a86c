//! Scripted differential-drive robot that feeds the live view in the demo.

use std::f64::consts::TAU;

use history::{Pose, Sample};
use liveview::EntityDescriptor;
use serde::{Deserialize, Serialize};

use crate::config::RobotConfig;

/// Wheel speeds (rad/s) as a function of time: a constant base plus a sine
/// that speeds one wheel up while slowing the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSchedule {
    pub base_right: f64,
    pub base_left: f64,
    pub amplitude: f64,
    /// Period of the sine (s); non-positive disables it
    pub period: f64,
}

impl Default for WheelSchedule {
    fn default() -> Self {
        Self {
            base_right: 3.5,
            base_left: 2.5,
            amplitude: 1.0,
            period: 20.0,
        }
    }
}

impl WheelSchedule {
    /// (right, left) wheel speeds at time t
    pub fn speeds(&self, t: f64) -> (f64, f64) {
        let wobble = if self.period > 0.0 {
            self.amplitude * (TAU * t / self.period).sin()
        } else {
            0.0
        };
        (self.base_right + wobble, self.base_left - wobble)
    }
}

#[derive(Debug, Clone)]
pub struct DiffDriveRobot {
    config: RobotConfig,
    pose: Pose,
    t: f64,
}

impl DiffDriveRobot {
    pub fn new(config: RobotConfig) -> Self {
        let pose = config.pose;
        Self { config, pose, t: 0.0 }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn descriptor(&self) -> EntityDescriptor {
        EntityDescriptor::new(self.config.name.clone(), self.config.color.clone(), self.config.pose)
    }

    /// Advance by dt and return the new sample
    pub fn step(&mut self, dt: f64) -> Sample {
        let (right, left) = self.config.schedule.speeds(self.t);
        let r = self.config.wheel_radius;
        let v = 0.5 * r * (right + left);
        let yaw_rate = r * (right - left) / self.config.track_width;

        self.pose.x += v * self.pose.theta.cos() * dt;
        self.pose.y += v * self.pose.theta.sin() * dt;
        self.pose.theta = (self.pose.theta + yaw_rate * dt).rem_euclid(TAU);
        self.t += dt;

        Sample::new(self.pose.x, self.pose.y, self.pose.theta, self.t, right, left)
    }
}
