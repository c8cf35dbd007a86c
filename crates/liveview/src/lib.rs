//! Live multi-panel chart for robot simulations.
//!
//! A [`LiveView`] owns three panels (trajectory, heading vs time, wheel speed
//! vs time), one [`history::TrackedEntity`] per registered robot and one set of
//! drawable series per robot. The simulation loop calls
//! [`LiveView::record_sample`] for every robot each tick and then
//! [`LiveView::refresh`] once, which presents a [`ChartFrame`] on a [`Surface`].

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod render;
pub mod series;
pub mod snapshot;
pub mod surface;
pub mod view;
pub mod window;

pub use config::{AxisRange, Bounds, DuplicatePolicy, ViewConfig};
pub use error::ViewError;
pub use frame::{ChartFrame, LineKind, LineSeries, Marker, PanelFrame, PanelKind};
pub use series::{DirectionIndicator, EntitySeries};
pub use snapshot::PngSurface;
pub use surface::{frame_channel, ChannelSurface, FrameReceiver, HeadlessSurface, Surface};
pub use view::{EntityDescriptor, LiveView};
pub use window::LiveWindow;
