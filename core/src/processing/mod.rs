pub mod fanout;
pub mod transform;

pub use fanout::transform_concurrent;
pub use transform::{
    root_reference, spin_rotation, summarize, transform, transform_frame, ChannelStage,
};
