use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::debug;

use crate::analysis::CorrelationMatrix;
use crate::constants::CORRELATION_MATRIX_EXTENSION;
use crate::types::CoexpError;

/// Write a gene by bait correlation matrix
///
/// The header holds `gene` followed by the bait names. Undefined correlations
/// are written as `NaN`.
pub fn write_correlation_matrix<W: Write>(
    writer: &mut W,
    matrix: &CorrelationMatrix,
) -> Result<(), CoexpError> {
    let mut tsv = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    let header = std::iter::once("gene").chain(matrix.baits.iter().map(String::as_str));
    tsv.write_record(header)?;
    for (gene, row) in matrix.rows() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(gene.to_string());
        record.extend(row.iter().map(|value| format!("{value:?}")));
        tsv.write_record(&record)?;
    }
    tsv.flush()?;
    Ok(())
}

/// Write each matrix to `{output_dir}/{name}.correlation_matrix`
///
/// Returns the paths written, in input order.
pub fn write_correlation_matrices(
    matrices: &[CorrelationMatrix],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, CoexpError> {
    let mut paths = Vec::with_capacity(matrices.len());
    for matrix in matrices {
        let path = output_dir.join(format!("{}.{CORRELATION_MATRIX_EXTENSION}", matrix.name));
        let mut writer = BufWriter::new(File::create(&path)?);
        write_correlation_matrix(&mut writer, matrix)?;
        writer.flush()?;
        debug!("Wrote {}", path.display());
        paths.push(path);
    }
    Ok(paths)
}
