use crate::math::Vec3;
use crate::motion::Frame;
use serde::{Deserialize, Serialize};

pub use crate::motion::CHANNELS_PER_JOINT;

/// Ordering of the position and rotation triples inside one joint block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelLayout {
    /// `[pos.x, pos.y, pos.z, rot.x, rot.y, rot.z]`
    #[default]
    PositionFirst,
    /// `[rot.x, rot.y, rot.z, pos.x, pos.y, pos.z]`
    RotationFirst,
}

impl ChannelLayout {
    /// Offset of the position triple within a joint block.
    pub fn position_offset(self) -> usize {
        match self {
            ChannelLayout::PositionFirst => 0,
            ChannelLayout::RotationFirst => 3,
        }
    }

    /// Offset of the rotation triple within a joint block.
    pub fn rotation_offset(self) -> usize {
        match self {
            ChannelLayout::PositionFirst => 3,
            ChannelLayout::RotationFirst => 0,
        }
    }
}

/// How the synthetic spin treats the target joint's captured rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinMode {
    /// Discard the captured rotation.
    #[default]
    Replace,
    /// Apply the spin on top of the captured rotation (`spin * captured`).
    Compose,
}

/// Named parameters of the channel transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub root_joint: usize,
    pub target_joint: usize,
    pub spin_axis: Vec3,
    /// Degrees added to the target joint's spin per frame.
    pub spin_rate_deg: f64,
    pub spin_mode: SpinMode,
    pub layout: ChannelLayout,
    pub freeze_root_rotation: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            root_joint: 0,
            target_joint: 13,
            spin_axis: Vec3::Z,
            spin_rate_deg: 1.2,
            spin_mode: SpinMode::Replace,
            layout: ChannelLayout::PositionFirst,
            freeze_root_rotation: false,
        }
    }
}

impl TransformConfig {
    pub fn validate(&self) -> ChannelResult<()> {
        if self.spin_axis.normalized().is_none() {
            return Err(ChannelError::InvalidConfig(format!(
                "spin axis {:?} must be finite and non-zero",
                self.spin_axis.to_array()
            )));
        }
        if !self.spin_rate_deg.is_finite() {
            return Err(ChannelError::InvalidConfig(format!(
                "spin rate {} is not finite",
                self.spin_rate_deg
            )));
        }
        if self.root_joint == self.target_joint {
            return Err(ChannelError::InvalidConfig(format!(
                "root joint and target joint are both {}",
                self.root_joint
            )));
        }
        Ok(())
    }
}

/// Input payload for a processing stage.
#[derive(Debug, Clone, Default)]
pub struct StageInput {
    pub frames: Vec<Frame>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub frames: Vec<Frame>,
    pub metadata: StageMetadata,
}

/// Summary of one stage run, used for reports and logging.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageMetadata {
    pub frame_count: usize,
    pub joint_count: usize,
    pub root_reference: Option<Vec3>,
    pub notes: Vec<String>,
}

/// Common error type for channel parsing and transformation.
#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("line {line}: non-numeric channel token {token:?}")]
    Parse { line: usize, token: String },
    #[error("frame {frame}: {count} channels is not a multiple of {}", CHANNELS_PER_JOINT)]
    ChannelCount { frame: usize, count: usize },
    #[error("frame {frame}: expected {expected} channels, found {actual}")]
    JointCountMismatch {
        frame: usize,
        expected: usize,
        actual: usize,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Trait describing stateful frame-processing stages.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &TransformConfig) -> ChannelResult<()>;
    fn execute(&mut self, input: StageInput) -> ChannelResult<StageOutput>;
    fn cleanup(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_skeleton() {
        let config = TransformConfig::default();
        assert_eq!(config.root_joint, 0);
        assert_eq!(config.target_joint, 13);
        assert_eq!(config.spin_axis, Vec3::Z);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_axis_and_shared_joint() {
        let zero_axis = TransformConfig {
            spin_axis: Vec3::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            zero_axis.validate(),
            Err(ChannelError::InvalidConfig(_))
        ));

        let shared = TransformConfig {
            target_joint: 0,
            ..Default::default()
        };
        assert!(matches!(shared.validate(), Err(ChannelError::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_config_fills_defaults() {
        let config: TransformConfig =
            serde_json::from_str(r#"{"target_joint": 4, "spin_axis": [0.0, 1.0, 0.0], "layout": "rotation_first"}"#)
                .unwrap();
        assert_eq!(config.target_joint, 4);
        assert_eq!(config.spin_axis, Vec3::Y);
        assert_eq!(config.layout, ChannelLayout::RotationFirst);
        assert_eq!(config.spin_rate_deg, 1.2);
    }
}
