use crate::math::Vec3;
use crate::prelude::{ChannelError, ChannelLayout, ChannelResult};
use ndarray::{ArrayView2, ArrayViewMut2};
use serde::{Deserialize, Serialize};

/// Scalars per joint: a position triple and a rotation-vector triple.
pub const CHANNELS_PER_JOINT: usize = 6;

/// One time-sample of an animation as a flat list of channel values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    channels: Vec<f64>,
}

impl Frame {
    pub fn new(channels: Vec<f64>) -> Self {
        Self { channels }
    }

    /// Builds a frame from per-joint `(position, rotation)` pairs.
    pub fn from_joints(joints: &[(Vec3, Vec3)], layout: ChannelLayout) -> Self {
        let mut channels = vec![0.0; joints.len() * CHANNELS_PER_JOINT];
        for (block, (position, rotation)) in channels
            .chunks_exact_mut(CHANNELS_PER_JOINT)
            .zip(joints.iter())
        {
            let pos = layout.position_offset();
            let rot = layout.rotation_offset();
            block[pos..pos + 3].copy_from_slice(&position.to_array());
            block[rot..rot + 3].copy_from_slice(&rotation.to_array());
        }
        Self { channels }
    }

    pub fn channels(&self) -> &[f64] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<f64> {
        self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Whole joints in the frame; a fractional remainder is ignored here.
    pub fn joint_count(&self) -> usize {
        self.channels.len() / CHANNELS_PER_JOINT
    }

    /// `(joints, 6)` view of the channel values.
    pub fn blocks(&self) -> ChannelResult<ArrayView2<'_, f64>> {
        let shape = (self.joint_count(), CHANNELS_PER_JOINT);
        Ok(ArrayView2::from_shape(shape, &self.channels)?)
    }

    pub fn blocks_mut(&mut self) -> ChannelResult<ArrayViewMut2<'_, f64>> {
        let shape = (self.joint_count(), CHANNELS_PER_JOINT);
        Ok(ArrayViewMut2::from_shape(shape, &mut self.channels)?)
    }

    pub fn position(&self, joint: usize, layout: ChannelLayout) -> Option<Vec3> {
        self.triple(joint, layout.position_offset())
    }

    pub fn rotation(&self, joint: usize, layout: ChannelLayout) -> Option<Vec3> {
        self.triple(joint, layout.rotation_offset())
    }

    fn triple(&self, joint: usize, offset: usize) -> Option<Vec3> {
        if joint >= self.joint_count() {
            return None;
        }
        let start = joint * CHANNELS_PER_JOINT + offset;
        Vec3::from_slice(&self.channels[start..start + 3])
    }
}

impl From<Vec<f64>> for Frame {
    fn from(channels: Vec<f64>) -> Self {
        Self::new(channels)
    }
}

/// Checks that every frame holds whole joints and that all frames share one channel count.
///
/// Returns the common joint count (zero for an empty sequence).
pub fn validate_sequence(frames: &[Frame]) -> ChannelResult<usize> {
    let Some(first) = frames.first() else {
        return Ok(0);
    };
    let expected = first.channel_count();
    for (index, frame) in frames.iter().enumerate() {
        let count = frame.channel_count();
        if count % CHANNELS_PER_JOINT != 0 {
            return Err(ChannelError::ChannelCount {
                frame: index,
                count,
            });
        }
        if count != expected {
            return Err(ChannelError::JointCountMismatch {
                frame: index,
                expected,
                actual: count,
            });
        }
    }
    Ok(first.joint_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_joints_respects_layout() {
        let joints = [(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3))];
        let position_first = Frame::from_joints(&joints, ChannelLayout::PositionFirst);
        assert_eq!(position_first.channels(), &[1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);

        let rotation_first = Frame::from_joints(&joints, ChannelLayout::RotationFirst);
        assert_eq!(rotation_first.channels(), &[0.1, 0.2, 0.3, 1.0, 2.0, 3.0]);
        assert_eq!(
            rotation_first.position(0, ChannelLayout::RotationFirst),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn blocks_expose_one_row_per_joint() {
        let frame = Frame::new((0..12).map(f64::from).collect());
        let blocks = frame.blocks().unwrap();
        assert_eq!(blocks.dim(), (2, 6));
        assert_eq!(blocks[[1, 0]], 6.0);
    }

    #[test]
    fn out_of_range_joint_has_no_triples() {
        let frame = Frame::new(vec![0.0; 6]);
        assert!(frame.rotation(1, ChannelLayout::PositionFirst).is_none());
    }

    #[test]
    fn validate_sequence_flags_partial_joints_and_mismatch() {
        assert_eq!(validate_sequence(&[]).unwrap(), 0);

        let partial = [Frame::new(vec![0.0; 7])];
        assert!(matches!(
            validate_sequence(&partial),
            Err(ChannelError::ChannelCount { frame: 0, count: 7 })
        ));

        let mismatched = [Frame::new(vec![0.0; 12]), Frame::new(vec![0.0; 6])];
        assert!(matches!(
            validate_sequence(&mismatched),
            Err(ChannelError::JointCountMismatch {
                frame: 1,
                expected: 12,
                actual: 6
            })
        ));
    }
}
