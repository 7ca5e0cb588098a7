pub mod frame;
pub mod text;

pub use frame::{validate_sequence, Frame, CHANNELS_PER_JOINT};
pub use text::{format_frame, format_frames, parse_frames, parse_line};
