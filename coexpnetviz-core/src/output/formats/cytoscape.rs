use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::constants::{
    CORRELATION_INTERACTION, GENE_LIST_SEPARATOR, HOMOLOGY_INTERACTION, NODE_ID_PREFIX,
    STYLE_FILE_NAME,
};
use crate::network::{Network, Node};
use crate::types::{CoexpError, NodeId, NodeType};

/// Cytoscape style bundled with the crate
pub const STYLE: &[u8] = include_bytes!("../../../data/coexpnetviz_style.xml");

const NODE_ATTR_HEADER: [&str; 10] = [
    "id",
    "label",
    "colour",
    "type",
    "bait_gene",
    "species",
    "families",
    "family",
    "correlating_genes_in_family",
    "partition_id",
];

const EDGE_ATTR_HEADER: [&str; 2] = ["edge", "max_correlation"];

/// Formats a node id as `n<id>`, or an empty string when absent.
#[must_use]
pub fn format_node_id(id: Option<NodeId>) -> String {
    id.map_or_else(String::new, |id| format!("{NODE_ID_PREFIX}{id}"))
}

/// Shortest round-trip form, keeping `.0` on integral values. `NaN` is empty.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:?}")
    }
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer)
}

fn joined_genes(node: &Node) -> String {
    node.genes
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(GENE_LIST_SEPARATOR)
}

fn bait_gene(node: &Node) -> Result<String, CoexpError> {
    let mut genes = node.genes.iter();
    match (genes.next(), genes.next()) {
        (Some(gene), None) => Ok(gene.clone()),
        _ => Err(CoexpError::ValidationError(format!(
            "bait node {} must hold exactly one gene, got {}",
            format_node_id(Some(node.id)),
            node.genes.len()
        ))),
    }
}

fn node_record(node: &Node) -> Result<[String; 10], CoexpError> {
    let (bait_gene, families, family, correlating_genes) = match node.node_type {
        NodeType::Bait => (
            bait_gene(node)?,
            node.family.clone().unwrap_or_default(),
            String::new(),
            String::new(),
        ),
        NodeType::Family => (
            String::new(),
            String::new(),
            node.family.clone().unwrap_or_default(),
            joined_genes(node),
        ),
        NodeType::Gene => {
            let genes = joined_genes(node);
            (String::new(), String::new(), genes.clone(), genes)
        }
    };

    Ok([
        format_node_id(Some(node.id)),
        node.label.clone(),
        node.colour.to_hex(),
        node.node_type.label().to_string(),
        bait_gene,
        String::new(),
        families,
        family,
        correlating_genes,
        node.partition_id.map(|id| id.to_string()).unwrap_or_default(),
    ])
}

/// Write the node attribute table
///
/// Nothing is written if a node fails validation.
pub fn write_node_attr<W: Write>(writer: &mut W, network: &Network) -> Result<(), CoexpError> {
    let records = network
        .nodes
        .iter()
        .map(node_record)
        .collect::<Result<Vec<_>, _>>()?;

    let mut tsv = tsv_writer(writer);
    tsv.write_record(NODE_ATTR_HEADER)?;
    for record in &records {
        tsv.write_record(record)?;
    }
    tsv.flush()?;
    Ok(())
}

/// Write the correlation edge attribute table
pub fn write_edge_attr<W: Write>(writer: &mut W, network: &Network) -> Result<(), CoexpError> {
    let mut tsv = tsv_writer(writer);
    tsv.write_record(EDGE_ATTR_HEADER)?;
    for edge in &network.correlation_edges {
        let name = format!(
            "{} ({CORRELATION_INTERACTION}) {}",
            format_node_id(edge.bait_node),
            format_node_id(edge.node)
        );
        tsv.write_record([name, format_float(edge.max_correlation)])?;
    }
    tsv.flush()?;
    Ok(())
}

/// Write the network structure in SIF format
pub fn write_sif<W: Write>(writer: &mut W, network: &Network) -> Result<(), CoexpError> {
    let mut tsv = tsv_writer(writer);
    for node in network.bait_nodes() {
        tsv.write_record([format_node_id(Some(node.id)), String::new(), String::new()])?;
    }
    for edge in &network.correlation_edges {
        tsv.write_record([
            format_node_id(edge.bait_node),
            CORRELATION_INTERACTION.to_string(),
            format_node_id(edge.node),
        ])?;
    }
    for edge in &network.homology_edges {
        tsv.write_record([
            format_node_id(edge.node1),
            HOMOLOGY_INTERACTION.to_string(),
            format_node_id(edge.node2),
        ])?;
    }
    tsv.flush()?;
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<(), CoexpError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), CoexpError>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Write a Cytoscape network to `output_dir`
///
/// Writes `{name}.node.attr`, `{name}.edge.attr` (only if there are
/// correlation edges), `{name}.sif` and the `coexpnetviz_style.xml` style.
/// `output_dir` must exist.
pub fn write_cytoscape(network: &Network, name: &str, output_dir: &Path) -> Result<(), CoexpError> {
    network.validate()?;

    // Validate all nodes before creating any file
    let mut node_attr = Vec::new();
    write_node_attr(&mut node_attr, network)?;
    fs::write(output_dir.join(format!("{name}.node.attr")), node_attr)?;

    if !network.correlation_edges.is_empty() {
        write_file(&output_dir.join(format!("{name}.edge.attr")), |w| {
            write_edge_attr(w, network)
        })?;
    }
    write_file(&output_dir.join(format!("{name}.sif")), |w| {
        write_sif(w, network)
    })?;

    fs::write(output_dir.join(STYLE_FILE_NAME), STYLE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{CorrelationEdge, HomologyEdge};
    use crate::types::Colour;
    use tempfile::TempDir;

    fn create_test_network() -> Network {
        Network {
            nodes: vec![
                Node::bait(1, "b1").with_family("fama, famb").with_partition(0),
                Node::bait(2, "b2").with_partition(0),
                Node::new(3, "fama", NodeType::Family, Colour::new(0xf2, 0x6d, 0x6d))
                    .with_genes(["g2", "g1"])
                    .with_family("fama")
                    .with_partition(1),
                Node::new(4, "g3", NodeType::Gene, Colour::new(0x6d, 0xf2, 0x6d))
                    .with_genes(["g3"])
                    .with_partition(2),
            ],
            correlation_edges: vec![
                CorrelationEdge::new(1, 3, 1.0),
                CorrelationEdge::new(2, 4, -0.9),
            ],
            homology_edges: vec![HomologyEdge::new(1, 2)],
        }
    }

    fn to_string<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), CoexpError>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_format_node_id() {
        assert_eq!(format_node_id(Some(12)), "n12");
        assert_eq!(format_node_id(None), "");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-0.9), "-0.9");
        assert_eq!(format_float(0.8123), "0.8123");
        assert_eq!(format_float(f64::NAN), "");
    }

    #[test]
    fn test_write_node_attr() {
        let network = create_test_network();
        let output = to_string(|w| write_node_attr(w, &network));
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(
            lines[0],
            "id\tlabel\tcolour\ttype\tbait_gene\tspecies\tfamilies\tfamily\tcorrelating_genes_in_family\tpartition_id"
        );
        assert_eq!(lines[1], "n1\tb1\t#ffffff\tbait node\tb1\t\tfama, famb\t\t\t0");
        assert_eq!(lines[2], "n2\tb2\t#ffffff\tbait node\tb2\t\t\t\t\t0");
        assert_eq!(lines[3], "n3\tfama\t#f26d6d\tfamily node\t\t\t\tfama\tg1, g2\t1");
        assert_eq!(lines[4], "n4\tg3\t#6df26d\tfamily node\t\t\t\tg3\tg3\t2");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_write_node_attr_bait_without_gene() {
        let mut network = create_test_network();
        network.nodes[0].genes.clear();

        let mut buffer = Vec::new();
        let result = write_node_attr(&mut buffer, &network);
        assert!(matches!(result, Err(CoexpError::ValidationError(_))));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_write_edge_attr() {
        let network = create_test_network();
        let output = to_string(|w| write_edge_attr(w, &network));
        assert_eq!(
            output,
            "edge\tmax_correlation\nn1 (cor) n3\t1.0\nn2 (cor) n4\t-0.9\n"
        );
    }

    #[test]
    fn test_write_sif() {
        let mut network = create_test_network();
        network.correlation_edges.push(CorrelationEdge {
            bait_node: Some(1),
            node: None,
            max_correlation: 0.9,
        });
        let output = to_string(|w| write_sif(w, &network));
        assert_eq!(
            output,
            "n1\t\t\nn2\t\t\nn1\tcor\tn3\nn2\tcor\tn4\nn1\tcor\t\nn1\thom\tn2\n"
        );
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let mut network = create_test_network();
        network.nodes[2].label = "fam\"a".to_string();
        let output = to_string(|w| write_node_attr(w, &network));
        assert!(output.contains("\tfamily node\t"));
        assert!(output.contains("n3\t\"fam\"\"a\"\t"));
    }

    #[test]
    fn test_write_cytoscape_files() {
        let dir = TempDir::new().unwrap();
        let network = create_test_network();
        write_cytoscape(&network, "net", dir.path()).unwrap();

        for file in ["net.node.attr", "net.edge.attr", "net.sif", STYLE_FILE_NAME] {
            assert!(dir.path().join(file).exists(), "missing {file}");
        }
        let style = fs::read(dir.path().join(STYLE_FILE_NAME)).unwrap();
        assert_eq!(style, STYLE);
    }

    #[test]
    fn test_write_cytoscape_without_correlation_edges() {
        let dir = TempDir::new().unwrap();
        let network = Network {
            nodes: vec![Node::bait(1, "b1")],
            ..Default::default()
        };
        write_cytoscape(&network, "net", dir.path()).unwrap();

        assert!(!dir.path().join("net.edge.attr").exists());
        let sif = fs::read_to_string(dir.path().join("net.sif")).unwrap();
        assert_eq!(sif, "n1\t\t\n");
        let node_attr = fs::read_to_string(dir.path().join("net.node.attr")).unwrap();
        assert!(node_attr.ends_with("n1\tb1\t#ffffff\tbait node\tb1\t\t\t\t\t\n"));
    }

    #[test]
    fn test_write_cytoscape_empty_network() {
        let dir = TempDir::new().unwrap();
        let result = write_cytoscape(&Network::default(), "net", dir.path());
        match result {
            Err(CoexpError::ValidationError(message)) => assert_eq!(
                message,
                "network.nodes is empty. Cytoscape networks must have at least one node."
            ),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
