//! # CoExpNetViz
//!
//! Co-expression network construction and Cytoscape export.
//!
//! ## Overview
//!
//! Given a set of bait genes, one or more gene expression matrices and
//! optionally gene families, CoExpNetViz finds the genes that co-express
//! with the baits and builds a network of baits and the gene families they
//! co-express with. The network is written as Cytoscape files together with
//! a visual style.
//!
//! ## Features
//!
//! - **Readers**: Baits lists, expression matrices and gene family files
//! - **Parallel Correlation**: Bait correlations computed with Rayon
//! - **Cytoscape Output**: SIF, node and edge attribute tables plus a style
//! - **Job Files**: Complete runs described in a JSON file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coexpnetviz_core::{CoExpNetVizAnalyzer, config::CoexpConfig};
//! use coexpnetviz_core::output::write_cytoscape;
//! use std::path::Path;
//!
//! let analyzer = CoExpNetVizAnalyzer::new(CoexpConfig::default());
//! let results = analyzer.analyze_files("baits.txt", &["leaf.txt"], Some("families.txt"))?;
//!
//! write_cytoscape(&results.network, "network", Path::new("."))?;
//! println!("{}", results.summary());
//! # Ok::<(), coexpnetviz_core::types::CoexpError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Analysis configuration and job files
//! - [`engine`]: High-level analyzer
//! - [`reader`]: Plain text input readers
//! - [`expression`]: Expression matrices
//! - [`analysis`]: Correlation and network construction
//! - [`network`]: Network model
//! - [`results`]: Analysis results
//! - [`output`]: Cytoscape and correlation matrix writers
//! - [`dbms_info`]: Database limits
//! - [`types`]: Core types and errors
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, CoexpError>`](types::CoexpError),
//! providing detailed error information for:
//!
//! - I/O errors during file operations
//! - Malformed input files
//! - Invalid configuration or inputs
//! - Networks that cannot be exported

pub mod analysis;
pub mod config;
pub mod constants;
pub mod dbms_info;
pub mod engine;
pub mod expression;
pub mod network;
pub mod output;
pub mod reader;
pub mod results;
pub mod types;

pub use engine::CoExpNetVizAnalyzer;
pub use types::CoexpError;
