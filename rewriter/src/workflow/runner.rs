use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use channelcore::math::Vec3;
use channelcore::prelude::{ProcessingStage, StageInput, StageOutput};
use channelcore::processing::{summarize, transform_concurrent, ChannelStage};
use channelcore::{format_frames, parse_frames, Frame};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Builder as TokioBuilder;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub frame_count: usize,
    pub joint_count: usize,
    pub root_reference: Option<Vec3>,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Reads `input`, rewrites its channels, and writes the result to `output`
    /// (or the suffixed sibling of `input`). Nothing is written if any step fails.
    pub fn execute(&self, input: &Path, output: Option<&Path>) -> anyhow::Result<WorkflowResult> {
        self.config.validate()?;
        let text = fs::read_to_string(input)
            .with_context(|| format!("reading motion file {}", input.display()))?;
        let frames =
            parse_frames(&text).with_context(|| format!("parsing motion file {}", input.display()))?;

        if let Some(first) = frames.first() {
            info!(
                "{}: {} frames, {} channels, {} joints",
                input.display(),
                frames.len(),
                first.channel_count(),
                first.joint_count()
            );
        }

        let stage_output = self.run_frames(frames)?;
        let output_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.output_path_for(input));
        fs::write(&output_path, format_frames(&stage_output.frames))
            .with_context(|| format!("writing motion file {}", output_path.display()))?;
        info!(
            "wrote {} frames to {}",
            stage_output.frames.len(),
            output_path.display()
        );

        let metadata = stage_output.metadata;
        Ok(WorkflowResult {
            input: input.to_path_buf(),
            output: output_path,
            frame_count: metadata.frame_count,
            joint_count: metadata.joint_count,
            root_reference: metadata.root_reference,
            notes: metadata.notes,
        })
    }

    /// Runs the channel stage, or the concurrent fan-out on a tokio runtime when more
    /// than one worker is configured.
    pub fn run_frames(&self, frames: Vec<Frame>) -> anyhow::Result<StageOutput> {
        let transform_config = &self.config.transform;
        if self.config.workers > 1 {
            let metadata = summarize(&frames, transform_config);
            let runtime = TokioBuilder::new_multi_thread()
                .worker_threads(self.config.workers)
                .build()
                .context("creating runtime for concurrent transform")?;
            let frames = runtime
                .block_on(transform_concurrent(
                    frames,
                    transform_config.clone(),
                    self.config.workers,
                ))
                .context("executing concurrent transform")?;
            info!(
                "concurrent transform over {} workers: {}",
                self.config.workers,
                metadata.notes.join(", ")
            );
            return Ok(StageOutput { frames, metadata });
        }

        let mut stage = ChannelStage::new();
        stage
            .initialize(transform_config)
            .context("initializing channel stage")?;
        let output = stage
            .execute(StageInput { frames })
            .context("executing channel stage")?;
        stage.cleanup();

        Ok(output)
    }
}
