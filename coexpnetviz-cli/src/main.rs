//! # CoExpNetViz CLI - Co-expression Network Builder
//!
//! A command-line interface for building co-expression networks and writing
//! them as Cytoscape files.
//!
//! ## Usage
//!
//! ```bash
//! # Baits against a single expression matrix
//! coexpnetviz -b baits.txt -e leaf.txt -o network/
//!
//! # Several matrices, grouping genes by family
//! coexpnetviz -b baits.txt -e leaf.txt -e root.txt -f families.txt -o network/
//!
//! # Everything described in a job file
//! coexpnetviz -j job.json -o network/
//! ```
//!
//! ## Options
//!
//! - `-b, --baits <FILE>`: Bait genes, whitespace separated
//! - `-e, --expression-matrix <FILE>`: Expression matrix, may be repeated
//! - `-f, --gene-families <FILE>`: Gene families, one family per line
//! - `-j, --job <FILE>`: JSON job file, instead of `-b`, `-e` and `-f`
//! - `-o, --output <DIR>`: Output directory, created if missing (default: `.`)
//! - `-n, --name <NAME>`: Base name of the network files (default: `network`)
//! - `--negative-threshold <R>`: Anti-correlation threshold (default: -0.8)
//! - `--positive-threshold <R>`: Correlation threshold (default: 0.8)
//! - `-t, --threads <N>`: Number of worker threads (default: all cores)
//! - `--no-correlation-matrices`: Skip the `.correlation_matrix` files
//! - `-q, --quiet`: Only log warnings and errors
//! - `-v, --verbose`: More logging, may be repeated
//!
//! Explicit threshold and name options override those of a job file.
//!
//! ## Logging
//!
//! Logs go to stderr. `RUST_LOG` overrides the level set by `-q` and `-v`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use coexpnetviz_core::config::{CoexpConfig, JobConfig};
use coexpnetviz_core::constants::{
    DEFAULT_NEGATIVE_THRESHOLD, DEFAULT_NETWORK_NAME, DEFAULT_POSITIVE_THRESHOLD, VERSION,
};
use coexpnetviz_core::*;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("coexpnetviz")
        .version(VERSION)
        .about("Build co-expression networks of bait genes for Cytoscape")
        .arg(
            Arg::new("baits")
                .short('b')
                .long("baits")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present("job")
                .help("Bait genes, whitespace separated"),
        )
        .arg(
            Arg::new("expression-matrix")
                .short('e')
                .long("expression-matrix")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append)
                .required_unless_present("job")
                .help("Gene expression matrix (repeatable)"),
        )
        .arg(
            Arg::new("gene-families")
                .short('f')
                .long("gene-families")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Gene families: family name followed by its genes, tab separated"),
        )
        .arg(
            Arg::new("job")
                .short('j')
                .long("job")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with_all(["baits", "expression-matrix", "gene-families"])
                .help("JSON job file describing the inputs"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value(".")
                .help("Output directory, created if missing"),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .help(format!("Base name of the network files [default: {DEFAULT_NETWORK_NAME}]")),
        )
        .arg(
            Arg::new("negative-threshold")
                .long("negative-threshold")
                .value_name("R")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help(format!(
                    "Genes correlating below this anti-correlate with a bait [default: {DEFAULT_NEGATIVE_THRESHOLD}]"
                )),
        )
        .arg(
            Arg::new("positive-threshold")
                .long("positive-threshold")
                .value_name("R")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help(format!(
                    "Genes correlating above this correlate with a bait [default: {DEFAULT_POSITIVE_THRESHOLD}]"
                )),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of worker threads (default: all cores)"),
        )
        .arg(
            Arg::new("no-correlation-matrices")
                .long("no-correlation-matrices")
                .action(ArgAction::SetTrue)
                .help("Do not write correlation matrices"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Quiet mode"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase verbosity (-v debug, -vv trace)"),
        )
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        "warn"
    } else {
        match matches.get_count("verbose") {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coexpnetviz={level},coexpnetviz_core={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Job described by the command line, either read from `--job` or assembled
/// from the input options.
fn job_from_matches(matches: &ArgMatches) -> Result<JobConfig, CoexpError> {
    let mut job = if let Some(path) = matches.get_one::<PathBuf>("job") {
        JobConfig::from_file(path)?
    } else {
        let baits = matches
            .get_one::<PathBuf>("baits")
            .cloned()
            .ok_or_else(|| CoexpError::InvalidInput("--baits is required".to_string()))?;
        JobConfig {
            baits,
            expression_matrices: matches
                .get_many::<PathBuf>("expression-matrix")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            gene_families: matches.get_one::<PathBuf>("gene-families").cloned(),
            negative_threshold: None,
            positive_threshold: None,
            network_name: None,
        }
    };

    if let Some(&threshold) = matches.get_one::<f64>("negative-threshold") {
        job.negative_threshold = Some(threshold);
    }
    if let Some(&threshold) = matches.get_one::<f64>("positive-threshold") {
        job.positive_threshold = Some(threshold);
    }
    if let Some(name) = matches.get_one::<String>("name") {
        job.network_name = Some(name.clone());
    }
    Ok(job)
}

fn run(matches: &ArgMatches) -> Result<(), CoexpError> {
    let config = CoexpConfig {
        num_threads: matches.get_one::<usize>("threads").copied(),
        write_correlation_matrices: !matches.get_flag("no-correlation-matrices"),
        ..Default::default()
    };
    let job = job_from_matches(matches)?;
    debug!(?job, "Resolved job");

    let output_dir = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    let analyzer = CoExpNetVizAnalyzer::with_config(config)?;
    let output = analyzer.run_job(&job, &output_dir)?;

    if !matches.get_flag("quiet") {
        eprintln!(
            "Analysis complete! Wrote {} files to {}: {}.",
            output.files.iter().count(),
            output_dir.display(),
            output.results.summary()
        );
        if !output.results.missing_baits.is_empty() {
            eprintln!(
                "Baits not found in any expression matrix: {}",
                output.results.missing_baits.join(", ")
            );
        }
    }
    Ok(())
}

/// Main entry point for the CoExpNetViz CLI application.
///
/// Parses command-line arguments, reads the inputs, builds the network and
/// writes it to the output directory.
fn main() -> ExitCode {
    let matches = command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
