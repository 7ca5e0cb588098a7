//! Line-oriented text encoding: one frame per line, whitespace-separated decimals.

use crate::motion::frame::{validate_sequence, Frame};
use crate::prelude::{ChannelError, ChannelResult};
use std::fmt::Write;

/// Parses every non-blank line into a frame and validates the sequence shape.
pub fn parse_frames(text: &str) -> ChannelResult<Vec<Frame>> {
    let mut frames = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        frames.push(parse_line(line, index + 1)?);
    }
    validate_sequence(&frames)?;
    Ok(frames)
}

/// Parses one line; `line_number` is only used for error reporting.
pub fn parse_line(line: &str, line_number: usize) -> ChannelResult<Frame> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ChannelError::Parse {
                line: line_number,
                token: token.to_string(),
            })
        })
        .collect::<ChannelResult<Vec<_>>>()
        .map(Frame::new)
}

/// Renders one frame as space-joined values without a trailing newline.
pub fn format_frame(frame: &Frame) -> String {
    let mut out = String::with_capacity(frame.channel_count() * 8);
    for (i, value) in frame.channels().iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Debug formatting is the shortest representation that parses back to the same f64.
        let _ = write!(out, "{:?}", value);
    }
    out
}

/// Renders every frame on its own newline-terminated line.
pub fn format_frames(frames: &[Frame]) -> String {
    let mut out = String::new();
    for frame in frames {
        out.push_str(&format_frame(frame));
        out.push('\n');
    }
    out
}
