use std::collections::BTreeMap;
use std::thread;

use history::{Pose, Sample, TrackedEntity};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::color;
use crate::config::{AxisRange, Bounds, DuplicatePolicy, ViewConfig};
use crate::error::ViewError;
use crate::frame::{ChartFrame, PanelFrame, PanelKind};
use crate::series::EntitySeries;
use crate::surface::{HeadlessSurface, Surface};

/// What the simulation supplies when it starts tracking a robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    pub color: String,
    pub pose: Pose,
    #[serde(default)]
    pub right_speed: f64,
    #[serde(default)]
    pub left_speed: f64,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>, color: impl Into<String>, pose: Pose) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            pose,
            right_speed: 0.0,
            left_speed: 0.0,
        }
    }

    pub fn with_speeds(mut self, right_speed: f64, left_speed: f64) -> Self {
        self.right_speed = right_speed;
        self.left_speed = left_speed;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    bounds: Option<Bounds>,
    grid: bool,
}

impl Panel {
    fn frame(&self, kind: PanelKind) -> PanelFrame {
        PanelFrame::new(kind, self.bounds, self.grid)
    }
}

/// Cumulative renderer for tracked robots.
///
/// Owned by the simulation loop and driven from one thread: `record_sample`
/// for every robot each tick, then `refresh` once.
pub struct LiveView<S: Surface = HeadlessSurface> {
    config: ViewConfig,
    entities: BTreeMap<String, TrackedEntity>,
    series: BTreeMap<String, EntitySeries>,
    trajectory: Panel,
    heading: Panel,
    speed: Panel,
    surface: S,
    frames: u64,
}

impl LiveView<HeadlessSurface> {
    /// A view that renders into memory only
    pub fn headless(config: ViewConfig) -> Self {
        Self::new(config, HeadlessSurface::new())
    }
}

impl<S: Surface> LiveView<S> {
    pub fn new(config: ViewConfig, surface: S) -> Self {
        // The trajectory window is only pinned once samples start arriving.
        let trajectory = Panel { bounds: None, grid: false };
        let heading = Panel {
            bounds: Some(Bounds::new(config.initial_time_window, config.heading_range)),
            grid: true,
        };
        let speed = Panel {
            bounds: Some(Bounds::new(config.initial_time_window, config.speed_range)),
            grid: true,
        };
        Self {
            config,
            entities: BTreeMap::new(),
            series: BTreeMap::new(),
            trajectory,
            heading,
            speed,
            surface,
            frames: 0,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn entity(&self, name: &str) -> Option<&TrackedEntity> {
        self.entities.get(name)
    }

    pub fn series(&self, name: &str) -> Option<&EntitySeries> {
        self.series.get(name)
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn trajectory_bounds(&self) -> Option<Bounds> {
        self.trajectory.bounds
    }

    /// Time axis shared by the heading and speed panels
    pub fn time_axis(&self) -> Option<AxisRange> {
        self.heading.bounds.map(|b| b.x)
    }

    /// Start tracking an entity with one seeded sample and an unbound set of series.
    pub fn register_entity(&mut self, descriptor: EntityDescriptor) -> Result<(), ViewError> {
        let EntityDescriptor { name, color, pose, right_speed, left_speed } = descriptor;

        if self.entities.contains_key(&name) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => return Err(ViewError::DuplicateRegistration(name)),
                DuplicatePolicy::Replace => warn!("re-registering '{name}', previous history discarded"),
            }
        }

        let display = color::resolve(&color).unwrap_or_else(|| {
            warn!("unknown colour '{color}' for '{name}', drawing in grey");
            color::FALLBACK
        });
        let marker = color::resolve_or_fallback(&self.config.marker_color);

        let entity = TrackedEntity::new(name.clone(), color, pose)
            .with_initial_speeds(right_speed, left_speed)
            .with_retention(self.config.retention);

        info!("tracking '{name}' from ({:.3}, {:.3}, {:.3})", pose.x, pose.y, pose.theta);
        self.entities.insert(name.clone(), entity);
        self.series.insert(name, EntitySeries::new(display, marker, self.config.indicator_length));
        Ok(())
    }

    /// Record one tick for a registered entity and rebind its series.
    pub fn record_sample(&mut self, name: &str, sample: Sample) -> Result<(), ViewError> {
        let (Some(entity), Some(series)) = (self.entities.get_mut(name), self.series.get_mut(name)) else {
            return Err(ViewError::UnknownEntity(name.to_string()));
        };

        entity.append(sample);

        self.trajectory.bounds = Some(self.config.trajectory_bounds);
        self.trajectory.grid = true;

        series.rebind(name, &sample);

        // Zero and non-finite timestamps keep whatever time window was set before.
        if sample.t.is_finite() && sample.t > 0.0 {
            let window = AxisRange::new(0.0, sample.t);
            for panel in [&mut self.heading, &mut self.speed] {
                if let Some(bounds) = panel.bounds.as_mut() {
                    bounds.x = window;
                }
            }
        }

        debug!(
            "{name}: t={:.3} x={:.3} y={:.3} theta={:.3} r={:.3} l={:.3}",
            sample.t, sample.x, sample.y, sample.theta, sample.right_speed, sample.left_speed
        );
        Ok(())
    }

    /// Snapshot of everything currently bound, without presenting it
    pub fn frame(&self) -> ChartFrame {
        let mut frame = ChartFrame {
            index: self.frames,
            time: self
                .entities
                .values()
                .filter_map(|e| e.latest())
                .map(|s| s.t)
                .fold(0.0, f64::max),
            trajectory: self.trajectory.frame(PanelKind::Trajectory),
            heading: self.heading.frame(PanelKind::Heading),
            speed: self.speed.frame(PanelKind::Speed),
        };
        for (name, entity) in &self.entities {
            if let Some(series) = self.series.get(name) {
                series.draw_into(entity, &mut frame);
            }
        }
        frame
    }

    /// Present the current state and pause so the display can catch up.
    ///
    /// `frames()` counts successful presents only.
    pub fn refresh(&mut self) -> Result<(), ViewError> {
        let mut frame = self.frame();
        frame.index = self.frames + 1;
        self.surface.present(frame)?;
        self.frames += 1;

        let pause = self.config.refresh_pause();
        if !pause.is_zero() {
            thread::sleep(pause);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use history::Retention;
    use std::time::{Duration, Instant};

    fn quick_config() -> ViewConfig {
        ViewConfig::default().with_refresh_pause(Duration::ZERO)
    }

    fn view_with(names: &[(&str, &str)]) -> LiveView {
        let mut view = LiveView::headless(quick_config());
        for (name, color) in names {
            view.register_entity(EntityDescriptor::new(*name, *color, Pose::new(0.1, 0.2, 0.0)))
                .unwrap();
        }
        view
    }

    #[test]
    fn test_register_seeds_unbound_series() {
        let view = view_with(&[("R1", "red")]);
        assert_eq!(view.entity("R1").unwrap().len(), 1);
        let series = view.series("R1").unwrap();
        assert!(!series.is_bound());

        let frame = view.frame();
        assert!(frame.trajectory.line("R1").unwrap().points.is_empty());
        assert!(frame.heading.line("R1").unwrap().points.is_empty());
        assert!(frame.speed.line("R1 left").unwrap().points.is_empty());
        assert!(frame.speed.line("R1 right").unwrap().points.is_empty());
        assert!(frame.trajectory.markers.is_empty());
        assert!(frame.trajectory.bounds.is_none());
    }

    #[test]
    fn test_channels_grow_together() {
        let mut view = view_with(&[("R1", "red")]);
        for n in 1..=200 {
            let t = n as f64 * 0.05;
            view.record_sample("R1", Sample::new(t.cos(), t.sin(), t % 6.0, t, 1.0, -1.0))
                .unwrap();
            let e = view.entity("R1").unwrap();
            assert_eq!(e.len(), n + 1);
            assert!(e.is_consistent());
        }
    }

    #[test]
    fn test_reference_sequence() {
        let mut view = view_with(&[("R1", "red")]);
        view.record_sample("R1", Sample::new(0.15, 0.25, 0.1, 1.0, 2.0, 1.5)).unwrap();

        let e = view.entity("R1").unwrap();
        let positions: Vec<[f64; 2]> = e.positions().iter().copied().collect();
        assert_eq!(positions, vec![[0.1, 0.2], [0.15, 0.25]]);
        let times: Vec<f64> = e.times().iter().copied().collect();
        assert_eq!(times, vec![0.0, 1.0]);

        let frame = view.frame();
        assert_eq!(frame.trajectory.line("R1").unwrap().points, positions);
        assert_eq!(frame.trajectory.markers[0].position, [0.15, 0.25]);
        assert_eq!(frame.heading.line("R1").unwrap().points, vec![[0.0, 0.0], [1.0, 0.1]]);
        assert_eq!(frame.speed.line("R1 right").unwrap().points, vec![[0.0, 0.0], [1.0, 2.0]]);
        assert_eq!(frame.speed.line("R1 left").unwrap().points, vec![[0.0, 0.0], [1.0, 1.5]]);

        let ind = &frame.trajectory.indicators[0];
        assert_eq!(ind.label, "R1");
        assert_relative_eq!(ind.rotation_deg, 0.1_f64.to_degrees(), epsilon = 1e-12);
        assert_eq!(ind.position, [0.15, 0.25]);
    }

    #[test]
    fn test_unknown_entity_leaves_mapping_unchanged() {
        let mut view = view_with(&[("R1", "red")]);
        let err = view.record_sample("ghost", Sample::default()).unwrap_err();
        assert_eq!(err, ViewError::UnknownEntity("ghost".into()));
        assert_eq!(view.len(), 1);
        assert!(view.entity("ghost").is_none());
        assert_eq!(view.entity("R1").unwrap().len(), 1);
    }

    #[test]
    fn test_zero_timestamp_keeps_time_axis() {
        let mut view = view_with(&[("R1", "red")]);
        let initial = view.time_axis().unwrap();
        assert_eq!(initial, ViewConfig::default().initial_time_window);

        view.record_sample("R1", Sample::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(view.time_axis(), Some(initial));

        view.record_sample("R1", Sample::new(0.0, 0.0, 0.0, 2.5, 0.0, 0.0)).unwrap();
        assert_eq!(view.time_axis(), Some(AxisRange::new(0.0, 2.5)));

        view.record_sample("R1", Sample::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(view.time_axis(), Some(AxisRange::new(0.0, 2.5)));

        let frame = view.frame();
        assert_eq!(frame.speed.bounds.unwrap().x, AxisRange::new(0.0, 2.5));
        assert_eq!(frame.speed.bounds.unwrap().y, ViewConfig::default().speed_range);
    }

    #[test]
    fn test_non_finite_timestamp_keeps_time_axis() {
        let mut view = view_with(&[("R1", "red")]);
        view.record_sample("R1", Sample::new(0.0, 0.0, 0.0, 3.0, 0.0, 0.0)).unwrap();

        for t in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            view.record_sample("R1", Sample::new(0.1, 0.1, 0.0, t, 1.0, 1.0)).unwrap();
            assert_eq!(view.time_axis(), Some(AxisRange::new(0.0, 3.0)));
        }
        assert_eq!(view.entity("R1").unwrap().len(), 5);
        assert!(view.refresh().is_ok());
    }

    #[test]
    fn test_trajectory_bounds_pinned_on_sample() {
        let mut view = view_with(&[("R1", "red")]);
        assert!(view.trajectory_bounds().is_none());
        view.record_sample("R1", Sample::new(5.0, 5.0, 0.0, 1.0, 0.0, 0.0)).unwrap();
        assert_eq!(view.trajectory_bounds(), Some(ViewConfig::default().trajectory_bounds));
        assert!(view.frame().trajectory.grid);
    }

    #[test]
    fn test_entities_are_isolated() {
        let mut view = view_with(&[("R1", "red"), ("R2", "blue")]);
        for n in 1..=10 {
            view.record_sample("R1", Sample::new(n as f64, 0.0, 0.0, n as f64, 1.0, 1.0)).unwrap();
        }
        view.record_sample("R2", Sample::new(0.0, -1.0, 0.0, 1.0, 2.0, 2.0)).unwrap();

        assert_eq!(view.entity("R1").unwrap().len(), 11);
        assert_eq!(view.entity("R2").unwrap().len(), 2);
        assert_eq!(view.entity("R2").unwrap().positions()[1], [0.0, -1.0]);
        assert_eq!(view.entity("R1").unwrap().color(), "red");
        assert_eq!(view.entity("R2").unwrap().color(), "blue");

        let frame = view.frame();
        assert_eq!(frame.trajectory.line("R1").unwrap().points.len(), 11);
        assert_eq!(frame.trajectory.line("R2").unwrap().points.len(), 2);
        assert_ne!(
            frame.trajectory.line("R1").unwrap().color,
            frame.trajectory.line("R2").unwrap().color
        );
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let mut view = view_with(&[("R1", "red")]);
        view.record_sample("R1", Sample::new(0.3, 0.3, 0.0, 1.0, 0.0, 0.0)).unwrap();

        let err = view
            .register_entity(EntityDescriptor::new("R1", "blue", Pose::default()))
            .unwrap_err();
        assert_eq!(err, ViewError::DuplicateRegistration("R1".into()));
        assert_eq!(view.entity("R1").unwrap().len(), 2);
        assert_eq!(view.entity("R1").unwrap().color(), "red");
    }

    #[test]
    fn test_duplicate_replaced_when_configured() {
        let config = quick_config().with_duplicate_policy(DuplicatePolicy::Replace);
        let mut view = LiveView::headless(config);
        view.register_entity(EntityDescriptor::new("R1", "red", Pose::default())).unwrap();
        view.record_sample("R1", Sample::new(0.3, 0.3, 0.0, 1.0, 0.0, 0.0)).unwrap();

        view.register_entity(EntityDescriptor::new("R1", "blue", Pose::new(0.5, 0.5, 1.0)))
            .unwrap();
        let e = view.entity("R1").unwrap();
        assert_eq!(e.len(), 1);
        assert_eq!(e.color(), "blue");
        assert_eq!(e.positions()[0], [0.5, 0.5]);
        assert!(!view.series("R1").unwrap().is_bound());
    }

    #[test]
    fn test_initial_speeds_from_descriptor() {
        let mut view = LiveView::headless(quick_config());
        view.register_entity(EntityDescriptor::new("R1", "r", Pose::default()).with_speeds(3.0, 4.0))
            .unwrap();
        let e = view.entity("R1").unwrap();
        assert_eq!(e.right_speeds()[0], 3.0);
        assert_eq!(e.left_speeds()[0], 4.0);
    }

    #[test]
    fn test_retention_applies_to_entities() {
        let config = quick_config().with_retention(Retention::window(5));
        let mut view = LiveView::headless(config);
        view.register_entity(EntityDescriptor::new("R1", "r", Pose::default())).unwrap();
        for n in 1..=50 {
            view.record_sample("R1", Sample::new(0.0, 0.0, 0.0, n as f64, 0.0, 0.0)).unwrap();
        }
        assert_eq!(view.entity("R1").unwrap().len(), 5);
        assert_eq!(view.frame().heading.line("R1").unwrap().points.len(), 5);
    }

    #[test]
    fn test_refresh_presents_numbered_frames() {
        let mut view = view_with(&[("R1", "red")]);
        view.record_sample("R1", Sample::new(0.2, 0.2, 0.0, 0.5, 0.0, 0.0)).unwrap();
        view.refresh().unwrap();
        view.refresh().unwrap();
        assert_eq!(view.frames(), 2);
        assert_eq!(view.surface().presented(), 2);
        let last = view.surface().last_frame().unwrap();
        assert_eq!(last.index, 2);
        assert_relative_eq!(last.time, 0.5);
    }

    #[test]
    fn test_failed_refresh_is_not_counted() {
        let (surface, frames) = crate::surface::frame_channel();
        let mut view = LiveView::new(quick_config(), surface);
        view.refresh().unwrap();
        assert_eq!(view.frames(), 1);

        drop(frames);
        assert_eq!(view.refresh(), Err(ViewError::SurfaceClosed));
        assert_eq!(view.frames(), 1);
        assert_eq!(view.frame().index, 1);
    }

    #[test]
    fn test_refresh_pauses() {
        let config = ViewConfig::default().with_refresh_pause(Duration::from_millis(20));
        let mut view = LiveView::headless(config);
        let start = Instant::now();
        view.refresh().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_refresh_bounded_with_large_history() {
        let mut view = LiveView::headless(ViewConfig::default());
        view.register_entity(EntityDescriptor::new("R1", "red", Pose::default())).unwrap();
        for n in 1..=10_000 {
            let t = n as f64 * 0.01;
            view.record_sample("R1", Sample::new(t.sin(), t.cos(), t % 6.0, t, 1.0, 1.0)).unwrap();
        }
        let start = Instant::now();
        view.refresh().unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));
        let frame = view.surface().last_frame().unwrap();
        assert_eq!(frame.trajectory.line("R1").unwrap().points.len(), 10_001);
    }

    #[test]
    fn test_nan_propagates_without_error() {
        let mut view = view_with(&[("R1", "red")]);
        view.record_sample("R1", Sample::new(f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0)).unwrap();
        let frame = view.frame();
        assert!(frame.trajectory.line("R1").unwrap().points[1][0].is_nan());
    }
}
