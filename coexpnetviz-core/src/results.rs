use std::collections::BTreeSet;
use std::fmt;

use crate::analysis::{BAIT_PARTITION, CorrelationMatrix};
use crate::network::Network;
use crate::types::NodeType;

/// Results of a co-expression analysis.
///
/// # Fields
///
/// - `network`: The co-expression network, ready to be written
/// - `correlation_matrices`: Bait to gene correlations per expression matrix
/// - `missing_baits`: Baits that occur in none of the expression matrices
///
/// # Examples
///
/// ```rust,no_run
/// use coexpnetviz_core::{CoExpNetVizAnalyzer, config::CoexpConfig};
///
/// let analyzer = CoExpNetVizAnalyzer::new(CoexpConfig::default());
/// let results = analyzer.analyze_files("baits.txt", &["leaf.txt"], Some("families.txt"))?;
///
/// println!("{}", results.summary());
/// for bait in &results.missing_baits {
///     println!("Not found: {bait}");
/// }
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisResults {
    pub network: Network,

    /// One matrix per expression matrix containing at least one bait, in
    /// input order.
    pub correlation_matrices: Vec<CorrelationMatrix>,

    pub missing_baits: Vec<String>,
}

impl AnalysisResults {
    #[must_use]
    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary::from_network(&self.network)
    }
}

/// Node and edge counts of a network.
///
/// ```rust
/// # use coexpnetviz_core::results::NetworkSummary;
/// let summary = NetworkSummary {
///     bait_nodes: 2,
///     family_nodes: 3,
///     gene_nodes: 1,
///     correlation_edges: 5,
///     homology_edges: 1,
///     partitions: 2,
/// };
/// assert_eq!(
///     summary.to_string(),
///     "2 baits, 3 family nodes, 1 gene nodes, 5 correlation edges, 1 homology edges, 2 partitions"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkSummary {
    pub bait_nodes: usize,
    pub family_nodes: usize,
    pub gene_nodes: usize,
    pub correlation_edges: usize,
    pub homology_edges: usize,
    /// Partitions of non-bait nodes
    pub partitions: usize,
}

impl NetworkSummary {
    #[must_use]
    pub fn from_network(network: &Network) -> Self {
        let count = |node_type: NodeType| {
            network
                .nodes
                .iter()
                .filter(|node| node.node_type == node_type)
                .count()
        };
        let partitions: BTreeSet<u64> = network
            .non_bait_nodes()
            .filter_map(|node| node.partition_id)
            .filter(|&id| id != BAIT_PARTITION)
            .collect();

        Self {
            bait_nodes: count(NodeType::Bait),
            family_nodes: count(NodeType::Family),
            gene_nodes: count(NodeType::Gene),
            correlation_edges: network.correlation_edges.len(),
            homology_edges: network.homology_edges.len(),
            partitions: partitions.len(),
        }
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} baits, {} family nodes, {} gene nodes, {} correlation edges, {} homology edges, {} partitions",
            self.bait_nodes,
            self.family_nodes,
            self.gene_nodes,
            self.correlation_edges,
            self.homology_edges,
            self.partitions
        )
    }
}
