// =============================================================================
// Program
// =============================================================================

/// Version string for CoExpNetViz
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Analysis
// =============================================================================

/// Default correlation threshold below which a gene anti-correlates with a bait
pub const DEFAULT_NEGATIVE_THRESHOLD: f64 = -0.8;

/// Default correlation threshold above which a gene correlates with a bait
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.8;

/// Slack allowed on the `[-1, 1]` bounds of a correlation threshold
pub const THRESHOLD_TOLERANCE: f64 = 1e-7;

/// Minimum number of conditions for a meaningful Pearson correlation
pub const MIN_CONDITIONS: usize = 2;

// =============================================================================
// Cytoscape output
// =============================================================================

/// Default base name of the network files
pub const DEFAULT_NETWORK_NAME: &str = "network";

/// File name of the Cytoscape style written next to the network
pub const STYLE_FILE_NAME: &str = "coexpnetviz_style.xml";

/// Prefix of node ids in the Cytoscape files
pub const NODE_ID_PREFIX: char = 'n';

/// Interaction type of bait to node correlation edges
pub const CORRELATION_INTERACTION: &str = "cor";

/// Interaction type of homology edges
pub const HOMOLOGY_INTERACTION: &str = "hom";

/// Separator of gene names in a single attribute value
pub const GENE_LIST_SEPARATOR: &str = ", ";

/// Extension of correlation matrix files
pub const CORRELATION_MATRIX_EXTENSION: &str = "correlation_matrix";

/// Saturation of partition colours
pub const PARTITION_SATURATION: f64 = 0.55;

/// Value (brightness) of partition colours
pub const PARTITION_VALUE: f64 = 0.95;
