mod config;
mod robot;
mod sim;

use std::cell::Cell;
use std::rc::Rc;
use std::thread::{self, JoinHandle};

use liveview::{frame_channel, LiveView, LiveWindow, PngSurface, Surface};
use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use config::AppConfig;
use robot::DiffDriveRobot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    TermLogger::init(config.level_filter(), Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let title = config.window_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title(&title),
        ..Default::default()
    };

    let (surface, frames) = frame_channel();
    let worker: Rc<Cell<Option<JoinHandle<()>>>> = Rc::default();
    let slot = Rc::clone(&worker);
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            slot.set(Some(spawn_simulation(config, surface.with_repaint(cc.egui_ctx.clone()))));
            Ok(Box::new(LiveWindow::new(frames)))
        }),
    )?;

    // The window is gone, so the worker stops at its next refresh.
    if let Some(handle) = worker.take() {
        if handle.join().is_err() {
            error!("simulation thread panicked");
        }
    }
    Ok(())
}

/// Run the robots on a worker thread; the window stays on the main thread.
fn spawn_simulation<S>(config: AppConfig, surface: S) -> JoinHandle<()>
where
    S: Surface + Send + 'static,
{
    thread::spawn(move || {
        let mut view = LiveView::new(config.view.clone(), surface);
        let mut robots: Vec<DiffDriveRobot> = config.robots.iter().cloned().map(DiffDriveRobot::new).collect();
        info!("simulating {} robots for {:.1} s", robots.len(), config.duration);

        if let Err(e) = sim::run(&mut view, &mut robots, config.dt, config.duration) {
            error!("simulation stopped: {e}");
        }
        for robot in &robots {
            let pose = robot.pose();
            info!("{} ended at ({:.2}, {:.2}, {:.2})", robot.name(), pose.x, pose.y, pose.theta);
        }

        if let Some(path) = &config.snapshot_path {
            if let Err(e) = PngSurface::new(path).present(view.frame()) {
                error!("{e}");
            }
        }
    })
}
