//! Where refreshed frames go.

use std::sync::mpsc;

use log::{debug, warn};

use crate::error::ViewError;
use crate::frame::ChartFrame;

/// Frames queued towards the window before new ones are dropped
const MAX_QUEUED_FRAMES: usize = 4;

/// A rendering target for chart frames
pub trait Surface {
    /// Present one frame. Errors with `ViewError::SurfaceClosed` once the target is gone.
    fn present(&mut self, frame: ChartFrame) -> Result<(), ViewError>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn present(&mut self, frame: ChartFrame) -> Result<(), ViewError> {
        (**self).present(frame)
    }
}

/// Keeps the last presented frame in memory. Used for tests and batch runs.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    presented: u64,
    last: Option<ChartFrame>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&ChartFrame> {
        self.last.as_ref()
    }
}

impl Surface for HeadlessSurface {
    fn present(&mut self, frame: ChartFrame) -> Result<(), ViewError> {
        self.presented += 1;
        self.last = Some(frame);
        Ok(())
    }
}

/// Receiving end held by [`crate::LiveWindow`]
pub type FrameReceiver = mpsc::Receiver<ChartFrame>;

/// Sends frames to a window running on another thread.
///
/// The channel is bounded; when the window falls behind, frames are dropped
/// rather than blocking the simulation.
pub struct ChannelSurface {
    tx: mpsc::SyncSender<ChartFrame>,
    repaint: Option<egui::Context>,
    dropped: u64,
}

/// Create a connected surface / receiver pair
pub fn frame_channel() -> (ChannelSurface, FrameReceiver) {
    let (tx, rx) = mpsc::sync_channel(MAX_QUEUED_FRAMES);
    (
        ChannelSurface {
            tx,
            repaint: None,
            dropped: 0,
        },
        rx,
    )
}

impl ChannelSurface {
    /// Request a repaint of `ctx` after each presented frame
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Surface for ChannelSurface {
    fn present(&mut self, frame: ChartFrame) -> Result<(), ViewError> {
        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(mpsc::TrySendError::Full(frame)) => {
                self.dropped += 1;
                if self.dropped == 1 || self.dropped % 100 == 0 {
                    warn!("window is lagging, dropped {} frames", self.dropped);
                }
                debug!("dropped frame {}", frame.index);
            }
            Err(mpsc::TrySendError::Disconnected(_)) => return Err(ViewError::SurfaceClosed),
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{PanelFrame, PanelKind};

    fn empty_frame(index: u64) -> ChartFrame {
        ChartFrame {
            index,
            time: 0.0,
            trajectory: PanelFrame::new(PanelKind::Trajectory, None, false),
            heading: PanelFrame::new(PanelKind::Heading, None, true),
            speed: PanelFrame::new(PanelKind::Speed, None, true),
        }
    }

    #[test]
    fn test_headless_keeps_last() {
        let mut surface = HeadlessSurface::new();
        surface.present(empty_frame(1)).unwrap();
        surface.present(empty_frame(2)).unwrap();
        assert_eq!(surface.presented(), 2);
        assert_eq!(surface.last_frame().unwrap().index, 2);
    }

    #[test]
    fn test_channel_delivers_in_order() {
        let (mut surface, rx) = frame_channel();
        surface.present(empty_frame(1)).unwrap();
        surface.present(empty_frame(2)).unwrap();
        assert_eq!(rx.try_recv().unwrap().index, 1);
        assert_eq!(rx.try_recv().unwrap().index, 2);
    }

    #[test]
    fn test_channel_drops_when_full() {
        let (mut surface, rx) = frame_channel();
        for i in 0..(MAX_QUEUED_FRAMES as u64 + 3) {
            surface.present(empty_frame(i)).unwrap();
        }
        assert_eq!(surface.dropped(), 3);
        assert_eq!(rx.try_iter().count(), MAX_QUEUED_FRAMES);
    }

    #[test]
    fn test_channel_reports_closed() {
        let (mut surface, rx) = frame_channel();
        drop(rx);
        assert_eq!(surface.present(empty_frame(1)), Err(ViewError::SurfaceClosed));
    }
}
