use crate::math::{Quaternion, StatsHelper, Vec3};
use crate::motion::{validate_sequence, Frame};
use crate::prelude::{
    ChannelError, ChannelResult, ProcessingStage, SpinMode, StageInput, StageMetadata,
    StageOutput, TransformConfig,
};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;
use ndarray::ArrayViewMut1;

/// Pins the root position, freezes every other joint, and spins the target joint.
///
/// The sequence is validated up front, so an error means no frame was produced.
/// The first-frame reference lives only for the duration of this call.
pub fn transform(frames: &[Frame], config: &TransformConfig) -> ChannelResult<Vec<Frame>> {
    config.validate()?;
    validate_sequence(frames)?;
    let reference = root_reference(frames, config);
    frames
        .iter()
        .enumerate()
        .map(|(t, frame)| transform_frame(frame, t, reference, config))
        .collect()
}

/// Root position of the first frame, if the sequence has one.
pub fn root_reference(frames: &[Frame], config: &TransformConfig) -> Option<Vec3> {
    frames
        .first()
        .and_then(|frame| frame.position(config.root_joint, config.layout))
}

/// Spin applied to the target joint at frame index `t`.
pub fn spin_rotation(t: usize, config: &TransformConfig) -> Quaternion {
    Quaternion::from_axis_angle_deg(config.spin_axis, t as f64 * config.spin_rate_deg)
}

/// Rewrites a single frame at index `t`. Joints beyond the frame's own joint count are
/// simply absent, so a short skeleton never reaches the target branch.
pub fn transform_frame(
    frame: &Frame,
    t: usize,
    reference: Option<Vec3>,
    config: &TransformConfig,
) -> ChannelResult<Frame> {
    let pos = config.layout.position_offset();
    let rot = config.layout.rotation_offset();
    let mut out = frame.clone();
    {
        let mut blocks = out.blocks_mut()?;
        for (joint, mut block) in blocks.rows_mut().into_iter().enumerate() {
            if joint == config.root_joint {
                if let Some(reference) = reference {
                    write_triple(&mut block, pos, reference);
                }
                if config.freeze_root_rotation {
                    write_triple(&mut block, rot, Vec3::ZERO);
                }
            } else if joint == config.target_joint {
                let spin = spin_rotation(t, config);
                let rotation = match config.spin_mode {
                    SpinMode::Replace => spin,
                    SpinMode::Compose => spin * Quaternion::from_rotvec(read_triple(&block, rot)),
                };
                write_triple(&mut block, rot, rotation.to_rotvec());
            } else {
                write_triple(&mut block, rot, Vec3::ZERO);
            }
        }
    }
    Ok(out)
}

fn read_triple(block: &ArrayViewMut1<'_, f64>, offset: usize) -> Vec3 {
    Vec3::new(block[offset], block[offset + 1], block[offset + 2])
}

fn write_triple(block: &mut ArrayViewMut1<'_, f64>, offset: usize, value: Vec3) {
    block[offset] = value.x;
    block[offset + 1] = value.y;
    block[offset + 2] = value.z;
}

/// Metadata for a run over `frames`: shape, root reference, and notes on what was rewritten.
pub fn summarize(frames: &[Frame], config: &TransformConfig) -> StageMetadata {
    let joint_count = frames.first().map_or(0, Frame::joint_count);
    let frozen: Vec<Vec3> = frames
        .iter()
        .flat_map(|frame| {
            (0..frame.joint_count())
                .filter(move |&j| j != config.root_joint && j != config.target_joint)
                .filter_map(move |j| frame.rotation(j, config.layout))
        })
        .collect();
    let frozen_rms = StatsHelper::rms_norm(&frozen);

    let mut notes = vec![format!("frozen rotation RMS {:.4} rad", frozen_rms)];
    if joint_count > config.target_joint {
        let final_spin = frames.len().saturating_sub(1) as f64 * config.spin_rate_deg;
        notes.push(format!("final spin {:.2} deg", final_spin));
    } else {
        notes.push(format!(
            "target joint {} absent from {}-joint skeleton",
            config.target_joint, joint_count
        ));
    }

    StageMetadata {
        frame_count: frames.len(),
        joint_count,
        root_reference: root_reference(frames, config),
        notes,
    }
}

/// Stage wrapper around [`transform`] that records metadata, logs, and counts frames.
pub struct ChannelStage {
    config: Option<TransformConfig>,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ChannelStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }
}

impl Default for ChannelStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for ChannelStage {
    fn initialize(&mut self, config: &TransformConfig) -> ChannelResult<()> {
        config.validate()?;
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> ChannelResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| ChannelError::Internal("stage not initialized".into()))?;

        let frames = match transform(&input.frames, config) {
            Ok(frames) => frames,
            Err(err) => {
                self.metrics.record_failure();
                self.logger.record(&format!("ChannelStage rejected input: {}", err));
                return Err(err);
            }
        };
        self.metrics.record_frames(frames.len());

        let metadata = summarize(&input.frames, config);
        self.logger.record(&format!(
            "ChannelStage frames {} joints {} {}",
            metadata.frame_count,
            metadata.joint_count,
            metadata.notes.join(", ")
        ));
        self.logger
            .trace_detail(&format!("ChannelStage root reference {:?}", metadata.root_reference));

        Ok(StageOutput { frames, metadata })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
