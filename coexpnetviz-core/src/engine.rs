use std::fs;
use std::path::Path;

use tracing::info;

use crate::analysis::build_network;
use crate::config::{CoexpConfig, JobConfig};
use crate::expression::ExpressionMatrix;
use crate::output::{WrittenFiles, write_results};
use crate::reader::{
    GeneFamilies, read_baits_file, read_expression_matrix_file, read_gene_families_file,
};
use crate::results::AnalysisResults;
use crate::types::CoexpError;

/// Outcome of [`CoExpNetVizAnalyzer::run_job`].
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub results: AnalysisResults,
    pub files: WrittenFiles,
}

/// High-level interface for co-expression network analysis.
///
/// Ties the readers, the network construction and the writers together.
///
/// # Examples
///
/// ## Analyse in-memory data
///
/// ```rust
/// use coexpnetviz_core::{CoExpNetVizAnalyzer, config::CoexpConfig};
/// use coexpnetviz_core::expression::ExpressionMatrix;
/// use coexpnetviz_core::reader::GeneFamilies;
///
/// let matrix = ExpressionMatrix::new(
///     "leaf",
///     vec!["c1".into(), "c2".into(), "c3".into()],
///     vec!["bait".into(), "g1".into()],
///     vec![1.0, 2.0, 3.0, 3.0, 2.0, 1.0],
/// )?;
///
/// let analyzer = CoExpNetVizAnalyzer::new(CoexpConfig::default());
/// let results = analyzer.analyze(&["bait".to_string()], &GeneFamilies::new(), &[matrix])?;
/// assert_eq!(results.network.correlation_edges[0].max_correlation, -1.0);
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
///
/// ## Run a job file
///
/// ```rust,no_run
/// use coexpnetviz_core::{CoExpNetVizAnalyzer, config::{CoexpConfig, JobConfig}};
/// use std::path::Path;
///
/// let job = JobConfig::from_file("job.json")?;
/// let analyzer = CoExpNetVizAnalyzer::with_config(CoexpConfig::default())?;
/// let output = analyzer.run_job(&job, Path::new("out"))?;
///
/// for path in output.files.iter() {
///     println!("Wrote {}", path.display());
/// }
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoExpNetVizAnalyzer {
    pub config: CoexpConfig,
}

impl CoExpNetVizAnalyzer {
    pub const fn new(config: CoexpConfig) -> Self {
        Self { config }
    }

    /// Creates an analyzer, validating `config` and configuring the global
    /// Rayon thread pool when `config.num_threads` is set.
    ///
    /// # Errors
    ///
    /// Returns [`CoexpError::InvalidInput`] if the configuration is invalid or
    /// the thread pool cannot be configured (e.g. it was already built).
    pub fn with_config(config: CoexpConfig) -> Result<Self, CoexpError> {
        config.validate()?;

        if let Some(num_threads) = config.num_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    CoexpError::InvalidInput(format!("Failed to configure thread pool: {e}"))
                })?;
        }

        Ok(Self { config })
    }

    /// Builds the co-expression network of `baits` in `matrices`.
    ///
    /// # Errors
    ///
    /// See [`build_network`].
    pub fn analyze(
        &self,
        baits: &[String],
        families: &GeneFamilies,
        matrices: &[ExpressionMatrix],
    ) -> Result<AnalysisResults, CoexpError> {
        build_network(baits, families, matrices, &self.config)
    }

    /// Reads the input files and builds the co-expression network.
    ///
    /// # Errors
    ///
    /// Returns [`CoexpError`] if a file cannot be read or parsed, or if the
    /// analysis fails.
    pub fn analyze_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        baits: P,
        matrices: &[Q],
        families: Option<P>,
    ) -> Result<AnalysisResults, CoexpError> {
        analyze_files_with(&self.config, baits, matrices, families)
    }

    /// Runs `job` and writes the network to `output_dir`.
    ///
    /// The job's thresholds and network name override the analyzer's. The
    /// output directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`CoexpError`] if reading, analysing or writing fails.
    pub fn run_job(&self, job: &JobConfig, output_dir: &Path) -> Result<JobOutput, CoexpError> {
        let config = job.apply_to(self.config.clone());
        config.validate()?;

        let results = analyze_files_with(
            &config,
            &job.baits,
            &job.expression_matrices,
            job.gene_families.as_ref(),
        )?;

        fs::create_dir_all(output_dir)?;
        let files = write_results(
            &results,
            &config.network_name,
            output_dir,
            config.write_correlation_matrices,
        )?;
        info!(
            output_dir = %output_dir.display(),
            files = files.iter().count(),
            "Wrote network {}",
            config.network_name
        );

        Ok(JobOutput { results, files })
    }
}

fn analyze_files_with<P: AsRef<Path>, Q: AsRef<Path>>(
    config: &CoexpConfig,
    baits: P,
    matrices: &[Q],
    families: Option<P>,
) -> Result<AnalysisResults, CoexpError> {
    let baits = read_baits_file(baits)?;
    let families = match families {
        Some(path) => read_gene_families_file(path)?,
        None => GeneFamilies::new(),
    };
    let matrices = matrices
        .iter()
        .map(read_expression_matrix_file)
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        baits = baits.len(),
        families = families.len(),
        matrices = matrices.len(),
        "Read input files"
    );
    build_network(&baits, &families, &matrices, config)
}
