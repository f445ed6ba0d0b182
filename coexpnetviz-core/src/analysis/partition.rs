use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{PARTITION_SATURATION, PARTITION_VALUE};
use crate::network::Network;
use crate::types::{Colour, NodeId};

/// Partition of the bait nodes.
pub const BAIT_PARTITION: u64 = 0;

/// Groups the nodes of `network` into partitions and colours them.
///
/// Bait nodes form partition [`BAIT_PARTITION`] and stay white. Every other
/// node is put in a partition with the nodes that have correlation edges to
/// exactly the same baits. Partitions are numbered from 1, in order of their
/// sorted bait ids, and each gets a distinct colour.
///
/// Returns the number of non-bait partitions.
pub fn assign_partitions(network: &mut Network) -> usize {
    let mut baits_by_node: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for edge in &network.correlation_edges {
        if let (Some(bait), Some(node)) = (edge.bait_node, edge.node) {
            baits_by_node.entry(node).or_default().insert(bait);
        }
    }

    let empty = BTreeSet::new();
    let bait_sets: BTreeSet<Vec<NodeId>> = network
        .non_bait_nodes()
        .map(|node| {
            baits_by_node
                .get(&node.id)
                .unwrap_or(&empty)
                .iter()
                .copied()
                .collect()
        })
        .collect();

    let partitions: BTreeMap<Vec<NodeId>, u64> = bait_sets
        .into_iter()
        .zip(1..)
        .collect();
    let colours = partition_colours(partitions.len());

    for node in &mut network.nodes {
        if node.is_bait() {
            node.partition_id = Some(BAIT_PARTITION);
            node.colour = Colour::WHITE;
            continue;
        }
        let key: Vec<NodeId> = baits_by_node
            .get(&node.id)
            .unwrap_or(&empty)
            .iter()
            .copied()
            .collect();
        if let Some(&partition_id) = partitions.get(&key) {
            node.partition_id = Some(partition_id);
            node.colour = colours[(partition_id - 1) as usize];
        }
    }

    partitions.len()
}

/// `count` distinct colours with evenly spaced hues.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::analysis::partition_colours;
///
/// let colours = partition_colours(3);
/// assert_eq!(colours.len(), 3);
/// assert_ne!(colours[0], colours[1]);
/// ```
#[must_use]
pub fn partition_colours(count: usize) -> Vec<Colour> {
    (0..count)
        .map(|index| {
            let hue = 360.0 * index as f64 / count as f64;
            Colour::from_hsv(hue, PARTITION_SATURATION, PARTITION_VALUE)
        })
        .collect()
}
