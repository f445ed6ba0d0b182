use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{
    DEFAULT_NEGATIVE_THRESHOLD, DEFAULT_NETWORK_NAME, DEFAULT_POSITIVE_THRESHOLD,
    THRESHOLD_TOLERANCE,
};
use crate::types::CoexpError;

/// Configuration settings for a CoExpNetViz analysis.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use coexpnetviz_core::config::CoexpConfig;
///
/// let config = CoexpConfig::default();
/// assert_eq!(config.network_name, "network");
/// ```
///
/// ## Stricter thresholds, single threaded
///
/// ```rust
/// use coexpnetviz_core::config::CoexpConfig;
///
/// let config = CoexpConfig {
///     negative_threshold: -0.95,
///     positive_threshold: 0.95,
///     num_threads: Some(1),
///     ..Default::default()
/// };
/// config.validate()?;
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CoexpConfig {
    /// Genes with a Pearson correlation below this value anti-correlate with a bait.
    ///
    /// **Default**: `-0.8`
    pub negative_threshold: f64,

    /// Genes with a Pearson correlation above this value correlate with a bait.
    ///
    /// **Default**: `0.8`
    pub positive_threshold: f64,

    /// Base name of the Cytoscape files (`{name}.sif`, `{name}.node.attr`, ...).
    ///
    /// **Default**: `"network"`
    pub network_name: String,

    /// Number of threads used to compute correlations.
    ///
    /// When set, configures the global Rayon thread pool.
    ///
    /// **Default**: `None` (use all available cores)
    pub num_threads: Option<usize>,

    /// Also write a `{matrix}.correlation_matrix` file per expression matrix.
    ///
    /// **Default**: `true`
    pub write_correlation_matrices: bool,
}

impl Default for CoexpConfig {
    fn default() -> Self {
        Self {
            negative_threshold: DEFAULT_NEGATIVE_THRESHOLD,
            positive_threshold: DEFAULT_POSITIVE_THRESHOLD,
            network_name: DEFAULT_NETWORK_NAME.to_string(),
            num_threads: None,
            write_correlation_matrices: true,
        }
    }
}

impl CoexpConfig {
    /// Checks thresholds are correlation values and in the right order.
    ///
    /// # Errors
    ///
    /// Returns [`CoexpError::InvalidInput`] if a threshold lies outside
    /// `[-1, 1]`, or if the negative threshold exceeds the positive one.
    pub fn validate(&self) -> Result<(), CoexpError> {
        check_threshold("negative_threshold", self.negative_threshold)?;
        check_threshold("positive_threshold", self.positive_threshold)?;
        if self.negative_threshold > self.positive_threshold {
            return Err(CoexpError::InvalidInput(format!(
                "negative_threshold ({}) must not exceed positive_threshold ({})",
                self.negative_threshold, self.positive_threshold
            )));
        }
        if self.network_name.is_empty() {
            return Err(CoexpError::InvalidInput(
                "network name must not be empty".to_string(),
            ));
        }
        // The name is used as a file name inside the output directory
        if self.network_name.contains(['/', '\\'])
            || matches!(self.network_name.as_str(), "." | "..")
        {
            return Err(CoexpError::InvalidInput(format!(
                "network name must be a plain file name, got {:?}",
                self.network_name
            )));
        }
        Ok(())
    }
}

fn check_threshold(name: &str, value: f64) -> Result<(), CoexpError> {
    if value.is_nan() || value.abs() > 1.0 + THRESHOLD_TOLERANCE {
        return Err(CoexpError::InvalidInput(format!(
            "{name} must be a number between -1 and 1, got {value}"
        )));
    }
    Ok(())
}

/// Description of a full CoExpNetViz run, read from a JSON job file.
///
/// ```json
/// {
///     "baits": "baits.txt",
///     "expression_matrices": ["leaf.txt", "root.txt"],
///     "gene_families": "families.txt",
///     "negative_threshold": -0.9,
///     "positive_threshold": 0.9,
///     "network_name": "drought"
/// }
/// ```
///
/// Only `baits` and `expression_matrices` are required. Relative paths are
/// resolved against the directory containing the job file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub baits: PathBuf,
    pub expression_matrices: Vec<PathBuf>,
    #[serde(default)]
    pub gene_families: Option<PathBuf>,
    #[serde(default)]
    pub negative_threshold: Option<f64>,
    #[serde(default)]
    pub positive_threshold: Option<f64>,
    #[serde(default)]
    pub network_name: Option<String>,
}

impl JobConfig {
    /// Reads a job file and resolves its input paths.
    ///
    /// # Errors
    ///
    /// Returns [`CoexpError`] if the file cannot be read, is not valid JSON,
    /// or lists no expression matrices.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CoexpError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut job: Self = serde_json::from_str(&contents)?;
        if job.expression_matrices.is_empty() {
            return Err(CoexpError::InvalidInput(format!(
                "{}: expression_matrices must list at least one file",
                path.display()
            )));
        }
        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }
        Ok(job)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.baits);
        self.expression_matrices.iter_mut().for_each(resolve);
        if let Some(families) = self.gene_families.as_mut() {
            resolve(families);
        }
    }

    /// Overlays the job's settings onto `config`.
    #[must_use]
    pub fn apply_to(&self, mut config: CoexpConfig) -> CoexpConfig {
        if let Some(threshold) = self.negative_threshold {
            config.negative_threshold = threshold;
        }
        if let Some(threshold) = self.positive_threshold {
            config.positive_threshold = threshold;
        }
        if let Some(name) = &self.network_name {
            config.network_name = name.clone();
        }
        config
    }
}
