//! In-memory co-expression network.
//!
//! A [`Network`] is a table of nodes plus two edge tables: correlation edges
//! between a bait node and any other node, and homology edges between any two
//! nodes. Networks are usually produced by
//! [`build_network`](crate::analysis::build_network) and consumed by
//! [`write_cytoscape`](crate::output::write_cytoscape).
//!
//! ## Examples
//!
//! ```rust
//! use coexpnetviz_core::network::{CorrelationEdge, Network, Node};
//! use coexpnetviz_core::types::{Colour, NodeType};
//!
//! let mut network = Network::default();
//! network.nodes.push(Node::bait(1, "at1g01010"));
//! network.nodes.push(Node::new(2, "fam1", NodeType::Family, Colour::new(200, 80, 80)));
//! network.correlation_edges.push(CorrelationEdge::new(1, 2, 0.93));
//!
//! assert_eq!(network.bait_nodes().count(), 1);
//! network.validate()?;
//! # Ok::<(), coexpnetviz_core::types::CoexpError>(())
//! ```

use std::collections::BTreeSet;

use crate::types::{CoexpError, Colour, NodeId, NodeType};

/// A node of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Display label: the gene name of bait and gene nodes, the family name of
    /// family nodes
    pub label: String,
    pub node_type: NodeType,
    pub colour: Colour,
    /// Genes in the node. A bait node holds exactly its bait gene; other nodes
    /// hold the genes that correlate with at least one bait.
    pub genes: BTreeSet<String>,
    /// Family name of a family node, or the families of a bait node
    pub family: Option<String>,
    /// Partition the node belongs to
    pub partition_id: Option<u64>,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, node_type: NodeType, colour: Colour) -> Self {
        Self {
            id,
            label: label.into(),
            node_type,
            colour,
            genes: BTreeSet::new(),
            family: None,
            partition_id: None,
        }
    }

    /// White bait node holding the single `gene`.
    pub fn bait(id: NodeId, gene: impl Into<String>) -> Self {
        let gene = gene.into();
        let mut node = Self::new(id, gene.clone(), NodeType::Bait, Colour::WHITE);
        node.genes.insert(gene);
        node
    }

    #[must_use]
    pub fn with_genes<I, S>(mut self, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genes.extend(genes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    #[must_use]
    pub fn with_partition(mut self, partition_id: u64) -> Self {
        self.partition_id = Some(partition_id);
        self
    }

    #[must_use]
    pub const fn is_bait(&self) -> bool {
        self.node_type.is_bait()
    }
}

/// Correlation between a bait node and another node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationEdge {
    pub bait_node: Option<NodeId>,
    pub node: Option<NodeId>,
    /// Highest Pearson correlation between the bait and a gene of `node`
    pub max_correlation: f64,
}

impl CorrelationEdge {
    #[must_use]
    pub const fn new(bait_node: NodeId, node: NodeId, max_correlation: f64) -> Self {
        Self {
            bait_node: Some(bait_node),
            node: Some(node),
            max_correlation,
        }
    }
}

/// Sequence homology between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HomologyEdge {
    pub node1: Option<NodeId>,
    pub node2: Option<NodeId>,
}

impl HomologyEdge {
    #[must_use]
    pub const fn new(node1: NodeId, node2: NodeId) -> Self {
        Self {
            node1: Some(node1),
            node2: Some(node2),
        }
    }
}

/// Co-expression network: nodes, correlation edges and homology edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub correlation_edges: Vec<CorrelationEdge>,
    pub homology_edges: Vec<HomologyEdge>,
}

impl Network {
    pub fn bait_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_bait())
    }

    pub fn non_bait_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| !node.is_bait())
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks the network can be exported.
    ///
    /// # Errors
    ///
    /// Returns [`CoexpError::ValidationError`] if the network has no nodes.
    pub fn validate(&self) -> Result<(), CoexpError> {
        if self.nodes.is_empty() {
            return Err(CoexpError::ValidationError(
                "network.nodes is empty. Cytoscape networks must have at least one node."
                    .to_string(),
            ));
        }
        Ok(())
    }
}
