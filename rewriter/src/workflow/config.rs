use anyhow::Context;
use channelcore::prelude::TransformConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SUFFIX: &str = "processed";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    #[serde(flatten)]
    pub transform: TransformConfig,
    pub output_suffix: String,
    pub workers: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            transform: TransformConfig::default(),
            output_suffix: DEFAULT_SUFFIX.to_string(),
            workers: 1,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Overrides from the command line; `None` keeps the loaded value.
    pub fn apply_overrides(
        &mut self,
        target_joint: Option<usize>,
        spin_rate_deg: Option<f64>,
        suffix: Option<String>,
        workers: Option<usize>,
    ) {
        if let Some(target_joint) = target_joint {
            self.transform.target_joint = target_joint;
        }
        if let Some(spin_rate_deg) = spin_rate_deg {
            self.transform.spin_rate_deg = spin_rate_deg;
        }
        if let Some(suffix) = suffix {
            self.output_suffix = suffix;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.transform
            .validate()
            .context("validating transform settings")?;
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if self.output_suffix.is_empty() {
            anyhow::bail!("output suffix must not be empty");
        }
        Ok(())
    }

    /// `dir/walk.txt` becomes `dir/walk_<suffix>.txt`; inputs without an extension get `.txt`.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "txt".to_string());
        input.with_file_name(format!("{}_{}.{}", stem, self.output_suffix, extension))
    }
}
