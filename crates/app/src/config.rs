//! Demo configuration, loaded from JSON. Every field has a default.

use std::f64::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use history::Pose;
use liveview::ViewConfig;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::robot::WheelSchedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub name: String,
    pub color: String,
    pub pose: Pose,
    /// Wheel radius (m)
    pub wheel_radius: f64,
    /// Distance between the wheels (m)
    pub track_width: f64,
    pub schedule: WheelSchedule,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            name: "R1".to_string(),
            color: "r".to_string(),
            pose: Pose::default(),
            wheel_radius: 0.03,
            track_width: 0.1,
            schedule: WheelSchedule::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
    pub window_title: String,
    /// Simulation step (s)
    pub dt: f64,
    /// Simulated time before the loop stops (s)
    pub duration: f64,
    pub view: ViewConfig,
    pub robots: Vec<RobotConfig>,
    /// Write the final frame to this PNG when the run ends
    pub snapshot_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window_title: "Robot Plotter".to_string(),
            dt: 0.1,
            duration: 50.0,
            view: ViewConfig::default(),
            robots: vec![
                RobotConfig::default(),
                RobotConfig {
                    name: "R2".to_string(),
                    color: "b".to_string(),
                    pose: Pose::new(-0.5, -0.5, FRAC_PI_2),
                    schedule: WheelSchedule {
                        base_right: 2.0,
                        base_left: 3.0,
                        amplitude: 1.5,
                        period: 12.0,
                    },
                    ..RobotConfig::default()
                },
            ],
            snapshot_path: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
