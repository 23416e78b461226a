pub mod controller;
pub mod metrics;
pub mod pointer;

pub use controller::{Controller, Playback};
pub use metrics::FrameStats;
pub use pointer::CanvasBox;
