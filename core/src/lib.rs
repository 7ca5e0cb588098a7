//! Per-frame joint channel rewriting for articulated motion data.
//!
//! Frames are flat lists of channel values, six per joint. The transform pins the
//! root joint's position to its first-frame value, freezes every other joint to the
//! identity rotation, and drives one target joint with a constant-rate spin.

pub mod math;
pub mod motion;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use motion::{format_frames, parse_frames, Frame};
pub use prelude::{ChannelError, ChannelResult, ProcessingStage, StageInput, StageOutput, TransformConfig};
pub use processing::{transform, transform_concurrent, ChannelStage};
