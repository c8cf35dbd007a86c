use crate::frame::ChartFrame;
use crate::render::show_frame;
use crate::surface::FrameReceiver;

/// eframe application showing the newest frame sent through a [`crate::ChannelSurface`].
pub struct LiveWindow {
    frames: FrameReceiver,
    latest: Option<ChartFrame>,
    finished: bool,
}

impl LiveWindow {
    pub fn new(frames: FrameReceiver) -> Self {
        Self {
            frames,
            latest: None,
            finished: false,
        }
    }

    /// Take everything queued, keeping only the newest frame
    fn drain(&mut self) {
        loop {
            match self.frames.try_recv() {
                Ok(frame) => self.latest = Some(frame),
                Err(std::sync::mpsc::TryRecvError::Empty) => break,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    if !self.finished {
                        log::info!("simulation finished, keeping last frame");
                    }
                    self.finished = true;
                    break;
                }
            }
        }
    }
}

impl eframe::App for LiveWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain();

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| match &self.latest {
                Some(frame) => {
                    ui.label(format!("Frame {}", frame.index));
                    ui.separator();
                    ui.label(format!("t = {:.2} s", frame.time));
                    if self.finished {
                        ui.separator();
                        ui.label("Simulation finished");
                    }
                }
                None => {
                    ui.label("Waiting for samples…");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(frame) = &self.latest {
                show_frame(ui, frame);
            }
        });
    }
}
