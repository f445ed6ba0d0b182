//! Readers for plain-text scientific input files.
//!
//! All readers accept files with any mix of `\r` and `\n` line endings and
//! ignore empty lines. Invalid UTF-8 sequences are replaced with `U+FFFD`
//! rather than rejected. Gene and family names are lower-cased where the
//! format's reader says so, so that names from different files match.
//!
//! ## Supported Inputs
//!
//! - **Expression matrix**: header line plus one row of expression values per
//!   gene ([`read_expression_matrix_file`])
//! - **Gene families**: tab separated `family gene1 gene2 ...` rows
//!   ([`read_gene_families_file`])
//! - **Baits**: whitespace separated gene names ([`read_baits_file`])
//! - **2D arrays**: whitespace separated words per line
//!   ([`read_whitespace_separated_2d_array_file`])
//!
//! ## Examples
//!
//! ```rust,no_run
//! use coexpnetviz_core::reader::{read_baits_file, read_expression_matrix_file};
//!
//! let baits = read_baits_file("baits.txt")?;
//! let matrix = read_expression_matrix_file("leaf_expression.txt")?;
//! println!("{} baits, {} genes in {}", baits.len(), matrix.len(), matrix.name());
//! # Ok::<(), coexpnetviz_core::types::CoexpError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::types::CoexpError;

mod families;
mod lists;
mod matrix;
mod sanitise;

pub use families::{GeneFamilies, parse_gene_families, read_gene_families_file};
pub(crate) use families::families_by_gene;
pub use lists::{
    parse_whitespace_separated_2d_array, read_baits_file, read_whitespace_separated_2d_array_file,
};
pub use matrix::{parse_expression_matrix, read_expression_matrix_file};
pub use sanitise::{sanitise_plain_text, sanitise_plain_text_file};

/// Reads a text file, decoding invalid UTF-8 lossily.
pub(crate) fn read_text(path: &Path) -> Result<String, CoexpError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Non-empty lines of `text`, split on any run of `\r` and `\n`.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter(|line| !line.trim().is_empty())
}
