//! Run configuration: YAML file, then command-line overrides

use crate::cli::Cli;
use lexistream_classifiers::{ClassifierConfig, ProjectionConfig};
use lexistream_core::{Error, Result, SplitPolicy};
use lexistream_matrix::MatrixConfig;
use lexistream_telemetry::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Everything a run needs besides its input paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Matrix builder settings, flattened into the top level
    #[serde(flatten)]
    pub matrix: MatrixConfig,

    /// In-lexicon events between reports
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,

    /// Train/test partition of a single lexicon source
    #[serde(default)]
    pub split: SplitPolicy,

    /// Skip malformed lexicon lines instead of failing
    #[serde(default)]
    pub lenient_lexicon: bool,

    #[serde(default)]
    pub report_format: ReportFormat,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Random projection in front of the classifier; absent means disabled
    #[serde(default)]
    pub projection: Option<ProjectionConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            matrix: MatrixConfig::default(),
            report_interval: default_report_interval(),
            split: SplitPolicy::default(),
            lenient_lexicon: false,
            report_format: ReportFormat::default(),
            classifier: ClassifierConfig::default(),
            projection: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from file (if present) and apply CLI overrides
    pub fn load(config_path: Option<&Path>, cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match config_path {
            Some(path) if path.exists() => Self::from_yaml(&std::fs::read_to_string(path)?)?,
            Some(path) => {
                warn!(path = %path.display(), "Configuration file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply CLI overrides
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(vocab_size) = cli.vocab_size {
            self.matrix.vocab_size = vocab_size;
        }
        if let Some(context_size) = cli.context_size {
            self.matrix.context_size = context_size;
        }
        if let Some(window) = cli.window {
            self.matrix.window_size = window;
        }
        if let Some(sketching) = cli.sketching {
            self.matrix.sketching = sketching;
        }
        if let Some(weighting) = cli.weighting {
            self.matrix.weighting = weighting;
        }
        if let Some(min_occurrences) = cli.min_occurrences {
            self.matrix.min_occurrences = min_occurrences;
        }
        if cli.focus_last_token {
            self.matrix.focus_last_token = true;
        }
        if let Some(interval) = cli.report_interval {
            self.report_interval = interval;
        }
        if let Some(split) = cli.split {
            self.split = split;
        }
        if cli.lenient_lexicon {
            self.lenient_lexicon = true;
        }
        if let Some(format) = cli.format {
            self.report_format = format;
        }
        if let Some(loss) = cli.loss {
            self.classifier.loss = loss;
        }
        if let Some(learning_rate) = cli.learning_rate {
            self.classifier.learning_rate = learning_rate;
        }

        if let Some(percent) = cli.projection_percent {
            self.projection.get_or_insert_with(ProjectionConfig::default).percent = percent;
        }
        if let (Some(seed), Some(projection)) = (cli.seed, self.projection.as_mut()) {
            projection.seed = seed;
        }
    }

    /// Reject invalid settings before any stream processing
    pub fn validate(&self) -> Result<()> {
        self.matrix.validate()?;
        if self.report_interval == 0 {
            return Err(Error::config("report interval must be at least 1"));
        }
        self.classifier.validate()?;
        if let Some(projection) = &self.projection {
            projection.validate()?;
        }
        Ok(())
    }
}

fn default_report_interval() -> u64 {
    1000
}
