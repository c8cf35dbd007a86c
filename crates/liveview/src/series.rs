//! Per-entity drawable series.
//!
//! One `EntitySeries` exists per registered entity for the lifetime of the
//! view. It starts unbound (every line empty) and becomes bound to the
//! entity's growing history on the first sample; later samples only move the
//! marker and the direction indicator.

use egui::Color32;
use history::{Sample, TrackedEntity};

use crate::frame::{ChartFrame, LineKind, LineSeries, Marker};

/// Arrow-shaped label at the entity's position, rotated to its heading.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionIndicator {
    pub label: String,
    pub position: [f64; 2],
    /// Heading in degrees, counter-clockwise from +x
    pub rotation_deg: f64,
    /// Arrow length in trajectory units
    pub length: f64,
    pub color: Color32,
}

impl DirectionIndicator {
    /// Arrow tip, `length` away from the position along the heading
    pub fn tip(&self) -> [f64; 2] {
        let (s, c) = self.rotation_deg.to_radians().sin_cos();
        [self.position[0] + self.length * c, self.position[1] + self.length * s]
    }
}

#[derive(Debug, Clone)]
pub struct EntitySeries {
    color: Color32,
    marker_color: Color32,
    indicator_length: f64,
    bound: bool,
    marker: Option<[f64; 2]>,
    indicator: Option<DirectionIndicator>,
}

impl EntitySeries {
    pub fn new(color: Color32, marker_color: Color32, indicator_length: f64) -> Self {
        Self {
            color,
            marker_color,
            indicator_length,
            bound: false,
            marker: None,
            indicator: None,
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn marker(&self) -> Option<[f64; 2]> {
        self.marker
    }

    pub fn indicator(&self) -> Option<&DirectionIndicator> {
        self.indicator.as_ref()
    }

    /// Point the series at the newest sample. The lines stay bound to the full history.
    pub fn rebind(&mut self, name: &str, sample: &Sample) {
        self.bound = true;
        self.marker = Some([sample.x, sample.y]);
        self.indicator = Some(DirectionIndicator {
            label: name.to_string(),
            position: [sample.x, sample.y],
            rotation_deg: sample.theta.to_degrees(),
            length: self.indicator_length,
            color: self.color,
        });
    }

    /// Append this entity's drawables to the frame
    pub fn draw_into(&self, entity: &TrackedEntity, frame: &mut ChartFrame) {
        let name = entity.name();

        let (trail, heading, left, right): (Vec<[f64; 2]>, Vec<[f64; 2]>, Vec<[f64; 2]>, Vec<[f64; 2]>) = if self.bound {
            (
                entity.positions().iter().copied().collect(),
                entity.against_time(entity.headings()).collect(),
                entity.against_time(entity.left_speeds()).collect(),
                entity.against_time(entity.right_speeds()).collect(),
            )
        } else {
            (Vec::new(), Vec::new(), Vec::new(), Vec::new())
        };

        frame.trajectory.lines.push(self.line(name.to_string(), LineKind::Solid, trail));
        if let Some(position) = self.marker {
            frame.trajectory.markers.push(Marker {
                label: format!("{name} position"),
                color: self.marker_color,
                position,
            });
        }
        if let Some(indicator) = &self.indicator {
            frame.trajectory.indicators.push(indicator.clone());
        }

        frame.heading.lines.push(self.line(name.to_string(), LineKind::Solid, heading));
        frame.speed.lines.push(self.line(format!("{name} left"), LineKind::Dashed, left));
        frame.speed.lines.push(self.line(format!("{name} right"), LineKind::Dotted, right));
    }

    fn line(&self, label: String, kind: LineKind, points: Vec<[f64; 2]>) -> LineSeries {
        LineSeries {
            label,
            color: self.color,
            kind,
            points,
        }
    }
}
