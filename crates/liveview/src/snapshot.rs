//! PNG export of a chart frame using plotters.

use std::path::{Path, PathBuf};

use egui::Color32;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::config::{AxisRange, Bounds};
use crate::error::ViewError;
use crate::frame::{ChartFrame, LineKind, PanelFrame};
use crate::surface::Surface;

/// Writes every presented frame to one PNG file, overwriting the previous one.
#[derive(Debug, Clone)]
pub struct PngSurface {
    path: PathBuf,
    size: (u32, u32),
}

impl PngSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (1280, 720),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Surface for PngSurface {
    fn present(&mut self, frame: ChartFrame) -> Result<(), ViewError> {
        draw_frame(&self.path, self.size, &frame).map_err(|e| ViewError::Snapshot(e.to_string()))?;
        log::info!("wrote frame {} to {}", frame.index, self.path.display());
        Ok(())
    }
}

fn draw_frame(path: &Path, size: (u32, u32), frame: &ChartFrame) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (left, right) = root.split_horizontally(size.0 / 2);
    let (top, bottom) = left.split_vertically(size.1 / 2);

    draw_panel(&top, &frame.speed)?;
    draw_panel(&bottom, &frame.heading)?;
    draw_panel(&right, &frame.trajectory)?;

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    panel: &PanelFrame,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let bounds = panel.bounds.unwrap_or_else(|| fit_bounds(panel));
    let x = widen(bounds.x);
    let y = widen(bounds.y);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.kind.title(), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x.min..x.max, y.min..y.max)?;

    {
        let mut mesh = chart.configure_mesh();
        if !panel.grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(panel.kind.x_label()).y_desc(panel.kind.y_label()).draw()?;
    }

    for line in &panel.lines {
        let color = rgb(line.color);
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .filter(|p| p[0].is_finite() && p[1].is_finite())
            .map(|p| (p[0], p[1]))
            .collect();
        match line.kind {
            LineKind::Solid => {
                chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;
            }
            LineKind::Dashed => {
                chart.draw_series(DashedLineSeries::new(points, 8, 4, color.stroke_width(1)))?;
            }
            LineKind::Dotted => {
                chart.draw_series(DashedLineSeries::new(points, 2, 4, color.stroke_width(1)))?;
            }
        }
    }

    for marker in &panel.markers {
        let [mx, my] = marker.position;
        if mx.is_finite() && my.is_finite() {
            chart.draw_series(std::iter::once(Cross::new((mx, my), 5, rgb(marker.color).stroke_width(2))))?;
        }
    }

    for indicator in &panel.indicators {
        let [ix, iy] = indicator.position;
        if !(ix.is_finite() && iy.is_finite()) {
            continue;
        }
        let color = rgb(indicator.color);
        let [tx, ty] = indicator.tip();
        if !(tx.is_finite() && ty.is_finite()) {
            continue;
        }
        chart.draw_series(std::iter::once(PathElement::new(vec![(ix, iy), (tx, ty)], color.stroke_width(3))))?;
        chart.draw_series(std::iter::once(Text::new(
            indicator.label.clone(),
            (ix, iy),
            ("sans-serif", 12).into_font().color(&color),
        )))?;
    }

    Ok(())
}

fn rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

/// Bounds enclosing every finite point of the panel, ±1 when there is none
fn fit_bounds(panel: &PanelFrame) -> Bounds {
    let mut x = AxisRange::new(f64::INFINITY, f64::NEG_INFINITY);
    let mut y = AxisRange::new(f64::INFINITY, f64::NEG_INFINITY);
    let points = panel
        .lines
        .iter()
        .flat_map(|l| l.points.iter().copied())
        .chain(panel.markers.iter().map(|m| m.position))
        .filter(|p| p[0].is_finite() && p[1].is_finite());
    for [px, py] in points {
        x.min = x.min.min(px);
        x.max = x.max.max(px);
        y.min = y.min.min(py);
        y.max = y.max.max(py);
    }
    if x.min > x.max {
        return Bounds::new(AxisRange::new(-1.0, 1.0), AxisRange::new(-1.0, 1.0));
    }
    Bounds::new(x, y)
}

/// Plotters needs a non-empty, finite range
fn widen(range: AxisRange) -> AxisRange {
    if !range.span().is_finite() {
        AxisRange::new(-1.0, 1.0)
    } else if range.span() > 0.0 {
        range
    } else {
        AxisRange::new(range.min - 0.5, range.min + 0.5)
    }
}
