use liveview::{LiveView, Surface, ViewError};
use log::info;

use crate::robot::DiffDriveRobot;

/// Drive every robot through the view in lock-step until `duration` of
/// simulated time has passed or the surface closes. Returns the number of
/// ticks run.
pub fn run<S: Surface>(
    view: &mut LiveView<S>,
    robots: &mut [DiffDriveRobot],
    dt: f64,
    duration: f64,
) -> Result<u64, ViewError> {
    for robot in robots.iter() {
        view.register_entity(robot.descriptor())?;
    }

    let steps = if dt > 0.0 { (duration / dt).round() as u64 } else { 0 };
    for tick in 0..steps {
        for robot in robots.iter_mut() {
            let sample = robot.step(dt);
            view.record_sample(robot.name(), sample)?;
        }
        match view.refresh() {
            Ok(()) => {}
            Err(ViewError::SurfaceClosed) => {
                info!("surface closed after {tick} ticks");
                return Ok(tick);
            }
            Err(e) => return Err(e),
        }
    }
    info!("simulation finished after {steps} ticks");
    Ok(steps)
}
