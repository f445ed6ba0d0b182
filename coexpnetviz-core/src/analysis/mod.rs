//! Co-expression network construction.
//!
//! Builds a [`Network`] from bait genes, expression matrices and gene
//! families:
//!
//! 1. Each bait is correlated (Pearson) with every other gene of the matrix
//!    it occurs in.
//! 2. Genes whose correlation with a bait falls outside
//!    `[negative_threshold, positive_threshold]` correlate with that bait.
//! 3. Correlating genes are grouped in one node per gene family. Genes
//!    without a family get a node of their own.
//! 4. Each such node gets a correlation edge to each bait it correlates with,
//!    weighted by the highest correlation among its genes.
//! 5. Bait nodes sharing a gene family are joined by a homology edge.
//! 6. Nodes are partitioned and coloured by the set of baits they correlate
//!    with (see [`assign_partitions`]).

mod correlation;
mod partition;

pub use correlation::{CorrelationMatrix, correlate_baits, pearson};
pub use partition::{BAIT_PARTITION, assign_partitions, partition_colours};

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::CoexpConfig;
use crate::constants::GENE_LIST_SEPARATOR;
use crate::expression::ExpressionMatrix;
use crate::network::{CorrelationEdge, HomologyEdge, Network, Node};
use crate::reader::{GeneFamilies, families_by_gene};
use crate::results::AnalysisResults;
use crate::types::{CoexpError, Colour, NodeId, NodeType};

/// Builds a co-expression network.
///
/// Bait names are lower-cased to match the readers' output and de-duplicated,
/// keeping the first occurrence. Baits missing from all matrices are skipped
/// with a warning.
///
/// # Errors
///
/// Returns [`CoexpError::InvalidInput`] if the configuration is invalid, two
/// matrices share a name, a gene occurs in more than one matrix, or none of
/// the baits occurs in any matrix.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::analysis::build_network;
/// use coexpnetviz_core::config::CoexpConfig;
/// use coexpnetviz_core::expression::ExpressionMatrix;
/// use coexpnetviz_core::reader::GeneFamilies;
///
/// let matrix = ExpressionMatrix::new(
///     "leaf",
///     vec!["c1".into(), "c2".into(), "c3".into()],
///     vec!["bait".into(), "g1".into()],
///     vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0],
/// )?;
/// let results = build_network(
///     &["BAIT".to_string()],
///     &GeneFamilies::new(),
///     &[matrix],
///     &CoexpConfig::default(),
/// )?;
/// assert_eq!(results.network.nodes.len(), 2);
/// assert_eq!(results.network.correlation_edges.len(), 1);
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
pub fn build_network(
    baits: &[String],
    families: &GeneFamilies,
    matrices: &[ExpressionMatrix],
    config: &CoexpConfig,
) -> Result<AnalysisResults, CoexpError> {
    config.validate()?;
    check_matrices_unique(matrices)?;

    let baits = normalise_baits(baits);
    let (found, missing): (Vec<String>, Vec<String>) = baits
        .into_iter()
        .partition(|bait| matrices.iter().any(|matrix| matrix.contains(bait)));
    for bait in &missing {
        warn!(bait = %bait, "Bait not found in any expression matrix, skipping");
    }
    if found.is_empty() {
        return Err(CoexpError::InvalidInput(
            "none of the baits occur in the expression matrices".to_string(),
        ));
    }

    // target gene -> bait -> correlation
    let mut correlating: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut correlation_matrices = Vec::new();
    let bait_set: BTreeSet<&str> = found.iter().map(String::as_str).collect();
    for matrix in matrices {
        let correlations = correlate_baits(matrix, &found);
        if correlations.baits.is_empty() {
            debug!(matrix = matrix.name(), "No baits in matrix, skipping");
            continue;
        }
        let mut hits = 0usize;
        for (gene, row) in correlations.rows() {
            if bait_set.contains(gene) {
                continue;
            }
            for (bait, &r) in correlations.baits.iter().zip(row) {
                if r < config.negative_threshold || r > config.positive_threshold {
                    correlating
                        .entry(gene.to_string())
                        .or_default()
                        .insert(bait.clone(), r);
                    hits += 1;
                }
            }
        }
        debug!(
            matrix = matrix.name(),
            baits = correlations.baits.len(),
            genes = correlations.genes.len(),
            correlations = hits,
            "Correlated baits"
        );
        correlation_matrices.push(correlations);
    }

    let network = assemble_network(&found, &correlating, families);
    info!(
        baits = found.len(),
        nodes = network.nodes.len(),
        correlation_edges = network.correlation_edges.len(),
        homology_edges = network.homology_edges.len(),
        "Built co-expression network"
    );

    Ok(AnalysisResults {
        network,
        correlation_matrices,
        missing_baits: missing,
    })
}

fn normalise_baits(baits: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    baits
        .iter()
        .map(|bait| bait.to_lowercase())
        .filter(|bait| seen.insert(bait.clone()))
        .collect()
}

/// Matrix names must be unique as they name the correlation matrix files.
fn check_matrices_unique(matrices: &[ExpressionMatrix]) -> Result<(), CoexpError> {
    let mut names = HashSet::new();
    let mut owner: HashMap<&str, &str> = HashMap::new();
    for matrix in matrices {
        if !names.insert(matrix.name()) {
            return Err(CoexpError::InvalidInput(format!(
                "multiple expression matrices named {}, rename one of the files",
                matrix.name()
            )));
        }
        for gene in matrix.genes() {
            if let Some(other) = owner.insert(gene.as_str(), matrix.name()) {
                return Err(CoexpError::InvalidInput(format!(
                    "gene {gene} present in multiple expression matrices: {other}, {}",
                    matrix.name()
                )));
            }
        }
    }
    Ok(())
}

fn assemble_network(
    baits: &[String],
    correlating: &BTreeMap<String, BTreeMap<String, f64>>,
    families: &GeneFamilies,
) -> Network {
    let families_of = families_by_gene(families);
    let mut network = Network::default();
    let mut next_id: NodeId = 1;

    let mut bait_ids: BTreeMap<&str, NodeId> = BTreeMap::new();
    for bait in baits {
        let mut node = Node::bait(next_id, bait.as_str());
        if let Some(bait_families) = families_of.get(bait.as_str()) {
            node.family = Some(join(bait_families.iter().copied()));
        }
        bait_ids.insert(bait.as_str(), next_id);
        network.nodes.push(node);
        next_id += 1;
    }

    // family -> correlating genes, and correlating genes without family
    let mut family_members: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut orphans: BTreeSet<&str> = BTreeSet::new();
    for gene in correlating.keys() {
        match families_of.get(gene.as_str()) {
            Some(gene_families) => {
                for &family in gene_families {
                    family_members.entry(family).or_default().insert(gene.as_str());
                }
            }
            None => {
                orphans.insert(gene.as_str());
            }
        }
    }

    let mut targets: Vec<Node> = Vec::new();
    for (family, genes) in family_members {
        targets.push(
            Node::new(next_id, family, NodeType::Family, Colour::default())
                .with_genes(genes.iter().copied())
                .with_family(family),
        );
        next_id += 1;
    }
    for gene in orphans {
        targets.push(
            Node::new(next_id, gene, NodeType::Gene, Colour::default()).with_genes([gene]),
        );
        next_id += 1;
    }

    for target in &targets {
        let mut max_by_bait: BTreeMap<NodeId, f64> = BTreeMap::new();
        for gene in &target.genes {
            for (bait, &r) in &correlating[gene] {
                let bait_id = bait_ids[bait.as_str()];
                max_by_bait
                    .entry(bait_id)
                    .and_modify(|max| *max = max.max(r))
                    .or_insert(r);
            }
        }
        network.correlation_edges.extend(
            max_by_bait
                .into_iter()
                .map(|(bait_id, r)| CorrelationEdge::new(bait_id, target.id, r)),
        );
    }
    network.correlation_edges.sort_by_key(|edge| (edge.bait_node, edge.node));
    network.nodes.extend(targets);

    let empty = BTreeSet::new();
    let bait_families: Vec<(NodeId, &BTreeSet<&str>)> = baits
        .iter()
        .map(|bait| {
            (
                bait_ids[bait.as_str()],
                families_of.get(bait.as_str()).unwrap_or(&empty),
            )
        })
        .collect();
    for (i, (id1, families1)) in bait_families.iter().enumerate() {
        for (id2, families2) in &bait_families[i + 1..] {
            if !families1.is_disjoint(families2) {
                network.homology_edges.push(HomologyEdge::new(*id1, *id2));
            }
        }
    }

    assign_partitions(&mut network);
    network
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(GENE_LIST_SEPARATOR)
}
