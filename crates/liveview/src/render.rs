//! egui_plot rendering of a chart frame: wheel speed over heading on the left,
//! trajectory spanning the right column.

use egui::RichText;
use egui_plot::{Arrows, Legend, Line, LineStyle, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};

use crate::frame::{ChartFrame, LineKind, PanelFrame, PanelKind};

const PANEL_GAP: f32 = 8.0;
const MIN_PANEL_HEIGHT: f32 = 120.0;

pub fn show_frame(ui: &mut egui::Ui, frame: &ChartFrame) {
    let height = ui.available_height().max(2.0 * MIN_PANEL_HEIGHT);
    let half = (height / 2.0 - PANEL_GAP).max(MIN_PANEL_HEIGHT);

    ui.columns(2, |cols| {
        show_panel(&mut cols[0], &frame.speed, half);
        show_panel(&mut cols[0], &frame.heading, half);
        show_panel(&mut cols[1], &frame.trajectory, height);
    });
}

fn line_style(kind: LineKind) -> LineStyle {
    match kind {
        LineKind::Solid => LineStyle::Solid,
        LineKind::Dashed => LineStyle::dashed_loose(),
        LineKind::Dotted => LineStyle::dotted_loose(),
    }
}

fn show_panel(ui: &mut egui::Ui, panel: &PanelFrame, height: f32) {
    Plot::new(panel.kind.id())
        .legend(Legend::default())
        .allow_scroll(false)
        .height(height)
        .show_grid(panel.grid)
        .y_axis_min_width(48.0)
        .x_axis_label(panel.kind.x_label())
        .y_axis_label(panel.kind.y_label())
        .show(ui, |plot_ui| {
            if let Some(b) = panel.bounds {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([b.x.min, b.y.min], [b.x.max, b.y.max]));
            }

            for line in &panel.lines {
                let width = if panel.kind == PanelKind::Trajectory { 2.0 } else { 1.5 };
                plot_ui.line(
                    Line::new(line.label.clone(), PlotPoints::from_iter(line.points.iter().copied()))
                        .color(line.color)
                        .style(line_style(line.kind))
                        .width(width),
                );
            }

            for marker in &panel.markers {
                plot_ui.points(
                    Points::new(marker.label.clone(), vec![marker.position])
                        .shape(MarkerShape::Asterisk)
                        .radius(6.0)
                        .color(marker.color),
                );
            }

            for indicator in &panel.indicators {
                plot_ui.arrows(
                    Arrows::new(
                        indicator.label.clone(),
                        vec![indicator.position],
                        vec![indicator.tip()],
                    )
                    .color(indicator.color),
                );
                let [x, y] = indicator.position;
                plot_ui.text(Text::new(
                    indicator.label.clone(),
                    PlotPoint::new(x, y),
                    RichText::new(&indicator.label).size(10.0).color(indicator.color),
                ));
            }
        });
}
