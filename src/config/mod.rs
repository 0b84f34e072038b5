//! Scenario configuration with YAML schema and validation.
//!
//! A scenario names one demo, its parameters, an optional seed and report
//! options. Loading runs serde parsing, then `validator` range checks, then
//! semantic checks that span fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::demos::{CltParams, DemoParams, PoissonParams};
use crate::error::{DemoError, DemoResult};

/// Top-level scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Human-readable scenario name.
    #[serde(default)]
    pub name: String,

    /// Fixed seed; `None` draws one from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Which demo to run and with what parameters.
    pub demo: DemoParams,

    /// Report options.
    #[validate(nested)]
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            name: String::new(),
            seed: None,
            demo: DemoParams::default(),
            report: ReportConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> DemoResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading scenario");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> DemoResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> DemoResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for programmatic construction.
    #[must_use]
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::default()
    }

    /// Checks beyond per-field ranges.
    fn validate_semantic(&self) -> DemoResult<()> {
        if self.schema_version.split('.').next() != Some("1") {
            return Err(DemoError::config(format!(
                "unsupported schema_version '{}', expected 1.x",
                self.schema_version
            )));
        }
        self.demo.check()
    }

    /// Require a fixed seed, as reproducibility checks do.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Config`] when no seed is set.
    pub fn require_seed(&self) -> DemoResult<u64> {
        self.seed.ok_or_else(|| {
            DemoError::config("reproducibility verification requires an explicit seed")
        })
    }
}

/// Builder for [`ScenarioConfig`].
#[derive(Debug, Default)]
pub struct ScenarioConfigBuilder {
    name: Option<String>,
    seed: Option<u64>,
    demo: Option<DemoParams>,
    report: Option<ReportConfig>,
}

impl ScenarioConfigBuilder {
    /// Set the scenario name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the CLT demo.
    #[must_use]
    pub const fn clt(mut self, params: CltParams) -> Self {
        self.demo = Some(DemoParams::Clt(params));
        self
    }

    /// Run the Poisson demo.
    #[must_use]
    pub const fn poisson(mut self, params: PoissonParams) -> Self {
        self.demo = Some(DemoParams::Poisson(params));
        self
    }

    /// Set report options.
    #[must_use]
    pub const fn report(mut self, report: ReportConfig) -> Self {
        self.report = Some(report);
        self
    }

    /// Build the scenario, validating it as a loaded file would be.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is out of range.
    pub fn build(self) -> DemoResult<ScenarioConfig> {
        let mut config = ScenarioConfig::default();
        if let Some(name) = self.name {
            config.name = name;
        }
        config.seed = self.seed;
        if let Some(demo) = self.demo {
            config.demo = demo;
        }
        if let Some(report) = self.report {
            config.report = report;
        }
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}

/// Report rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Histogram bin count.
    #[validate(range(min = 1, max = 200))]
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Width of the longest bar, in terminal columns.
    #[validate(range(min = 10, max = 200))]
    #[serde(default = "default_width")]
    pub width: usize,

    /// Keep raw draws in JSON output.
    #[serde(default)]
    pub include_raw: bool,
}

fn default_bins() -> usize {
    30
}

fn default_width() -> usize {
    50
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            width: default_width(),
            include_raw: false,
        }
    }
}
