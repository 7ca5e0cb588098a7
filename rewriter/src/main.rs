use anyhow::Context;
use channelcore::format_frames;
use clap::Parser;
use generator::skeleton::{build_motion, GeneratorConfig};
use log::info;
use std::fs;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Rewrites joint channels of a motion file")]
struct Args {
    /// Motion file with one whitespace-separated frame per line
    input: PathBuf,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Output path; defaults to `<stem>_<suffix>.<ext>` beside the input
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    suffix: Option<String>,
    #[arg(long)]
    target_joint: Option<usize>,
    /// Spin rate of the target joint in degrees per frame
    #[arg(long)]
    spin_rate: Option<f64>,
    #[arg(long)]
    workers: Option<usize>,
    /// Write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,
    /// Synthesize a demo motion with this many joints at INPUT before rewriting it
    #[arg(long)]
    demo: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };
    workflow_config.apply_overrides(args.target_joint, args.spin_rate, args.suffix, args.workers);

    if let Some(joints) = args.demo {
        let generator = GeneratorConfig {
            joints,
            layout: workflow_config.transform.layout,
            ..Default::default()
        };
        let motion = build_motion(&generator)?;
        fs::write(&args.input, format_frames(&motion))
            .with_context(|| format!("writing demo motion {}", args.input.display()))?;
        info!(
            "synthesized {} frames with {} joints at {}",
            motion.len(),
            joints,
            args.input.display()
        );
    }

    let runner = Runner::new(workflow_config);
    let result = runner.execute(&args.input, args.output.as_deref())?;

    println!(
        "Rewrote {} -> {}: frames {}, joints {}, target joint {}",
        result.input.display(),
        result.output.display(),
        result.frame_count,
        result.joint_count,
        runner.config().transform.target_joint
    );

    if let Some(report_path) = args.report {
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let report = serde_json::to_string_pretty(&result).context("serializing run report")?;
        fs::write(&report_path, report)
            .with_context(|| format!("writing run report {}", report_path.display()))?;
    }

    Ok(())
}
