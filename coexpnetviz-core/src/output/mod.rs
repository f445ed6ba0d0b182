//! Output writers for co-expression networks.
//!
//! ## Supported Formats
//!
//! - **Cytoscape**: `{name}.sif` network structure, `{name}.node.attr` and
//!   `{name}.edge.attr` attribute tables, plus the `coexpnetviz_style.xml`
//!   visual style
//! - **Correlation matrix**: tab separated gene by bait Pearson correlations
//!
//! ## Examples
//!
//! ### Write a network to a directory
//!
//! ```rust,no_run
//! use coexpnetviz_core::network::{Network, Node};
//! use coexpnetviz_core::output::write_cytoscape;
//! use std::path::Path;
//!
//! let mut network = Network::default();
//! network.nodes.push(Node::bait(1, "at1g01010"));
//!
//! write_cytoscape(&network, "network", Path::new("out"))?;
//! # Ok::<(), coexpnetviz_core::types::CoexpError>(())
//! ```
//!
//! ### Write the SIF to stdout
//!
//! ```rust
//! use coexpnetviz_core::network::{Network, Node};
//! use coexpnetviz_core::output::write_sif;
//! use std::io::stdout;
//!
//! let mut network = Network::default();
//! network.nodes.push(Node::bait(1, "at1g01010"));
//!
//! write_sif(&mut stdout(), &network)?;
//! # Ok::<(), coexpnetviz_core::types::CoexpError>(())
//! ```

mod formats {
    pub mod correlation_matrix;
    pub mod cytoscape;
}

pub use formats::correlation_matrix::{write_correlation_matrices, write_correlation_matrix};
pub use formats::cytoscape::{
    STYLE, format_float, format_node_id, write_cytoscape, write_edge_attr, write_node_attr,
    write_sif,
};

use std::path::{Path, PathBuf};

use crate::constants::STYLE_FILE_NAME;
use crate::results::AnalysisResults;
use crate::types::CoexpError;

/// Files written by [`write_results`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    pub node_attr: PathBuf,
    /// Absent when the network has no correlation edges
    pub edge_attr: Option<PathBuf>,
    pub sif: PathBuf,
    pub style: PathBuf,
    pub correlation_matrices: Vec<PathBuf>,
}

impl WrittenFiles {
    /// All written paths, network files first.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.node_attr.as_path())
            .chain(self.edge_attr.as_deref())
            .chain([self.sif.as_path(), self.style.as_path()])
            .chain(self.correlation_matrices.iter().map(PathBuf::as_path))
    }
}

/// Writes the network of `results` and, if asked, its correlation matrices.
///
/// This is the main entry point for output. `output_dir` must exist.
///
/// # Errors
///
/// Returns [`CoexpError`] if the network is invalid or a file cannot be
/// written.
pub fn write_results(
    results: &AnalysisResults,
    name: &str,
    output_dir: &Path,
    correlation_matrices: bool,
) -> Result<WrittenFiles, CoexpError> {
    write_cytoscape(&results.network, name, output_dir)?;

    let edge_attr = output_dir.join(format!("{name}.edge.attr"));
    let mut written = WrittenFiles {
        node_attr: output_dir.join(format!("{name}.node.attr")),
        edge_attr: (!results.network.correlation_edges.is_empty()).then_some(edge_attr),
        sif: output_dir.join(format!("{name}.sif")),
        style: output_dir.join(STYLE_FILE_NAME),
        correlation_matrices: Vec::new(),
    };

    if correlation_matrices {
        written.correlation_matrices =
            write_correlation_matrices(&results.correlation_matrices, output_dir)?;
    }
    Ok(written)
}
