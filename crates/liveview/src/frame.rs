//! Owned snapshot of the chart, handed to a [`crate::Surface`] on every refresh.

use egui::Color32;

use crate::config::Bounds;
use crate::series::DirectionIndicator;

/// The three panels of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// x/y path, right half
    Trajectory,
    /// heading vs time, lower left
    Heading,
    /// wheel speed vs time, upper left
    Speed,
}

impl PanelKind {
    pub fn id(&self) -> &'static str {
        match self {
            PanelKind::Trajectory => "trajectory_plot",
            PanelKind::Heading => "heading_plot",
            PanelKind::Speed => "speed_plot",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Trajectory => "Trajectory",
            PanelKind::Heading => "Heading",
            PanelKind::Speed => "Wheel Speed",
        }
    }

    pub fn x_label(&self) -> &'static str {
        match self {
            PanelKind::Trajectory => "x (m)",
            PanelKind::Heading | PanelKind::Speed => "Time (s)",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            PanelKind::Trajectory => "y (m)",
            PanelKind::Heading => "Angle (rad)",
            PanelKind::Speed => "Angular Speed (rad/sec)",
        }
    }
}

/// Stroke pattern of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub color: Color32,
    pub kind: LineKind,
    pub points: Vec<[f64; 2]>,
}

/// Single highlighted point
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub color: Color32,
    pub position: [f64; 2],
}

/// Everything drawn on one panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFrame {
    pub kind: PanelKind,
    /// `None` lets the surface fit the data
    pub bounds: Option<Bounds>,
    pub grid: bool,
    pub lines: Vec<LineSeries>,
    pub markers: Vec<Marker>,
    pub indicators: Vec<DirectionIndicator>,
}

impl PanelFrame {
    pub fn new(kind: PanelKind, bounds: Option<Bounds>, grid: bool) -> Self {
        Self {
            kind,
            bounds,
            grid,
            lines: Vec::new(),
            markers: Vec::new(),
            indicators: Vec::new(),
        }
    }

    pub fn line(&self, label: &str) -> Option<&LineSeries> {
        self.lines.iter().find(|l| l.label == label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    /// Refresh counter, starting at 1
    pub index: u64,
    /// Latest timestamp over all entities
    pub time: f64,
    pub trajectory: PanelFrame,
    pub heading: PanelFrame,
    pub speed: PanelFrame,
}
