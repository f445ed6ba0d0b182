use std::path::Path;

use tracing::debug;

use super::{lines, read_text};
use crate::expression::ExpressionMatrix;
use crate::types::CoexpError;

/// Reads an expression matrix file.
///
/// The file has 1 header line and 0 or more rows. The first column is the
/// gene (or gene variant) name, the other columns contain the expression
/// values of each condition. The header may or may not name the gene column.
///
/// Lines are separated by one or more newline characters (any amount of `\r`
/// or `\n`); empty lines are ignored. Columns are separated by any whitespace
/// other than newline characters. Gene names are lower-cased. `NA` values are
/// read as `NaN`.
///
/// The matrix is named after the file name of `path`.
///
/// # Errors
///
/// Returns [`CoexpError`] if the file cannot be read, lacks a header, has
/// rows of different widths, contains non-numeric values, or lists a gene
/// twice.
pub fn read_expression_matrix_file<P: AsRef<Path>>(path: P) -> Result<ExpressionMatrix, CoexpError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let matrix = parse_expression_matrix(&name, &text)?;
    debug!(
        matrix = matrix.name(),
        genes = matrix.len(),
        conditions = matrix.conditions().len(),
        "Read expression matrix"
    );
    Ok(matrix)
}

/// Parses the contents of an expression matrix file.
///
/// See [`read_expression_matrix_file`] for the format.
///
/// # Errors
///
/// Returns [`CoexpError::ParseError`] on malformed content.
pub fn parse_expression_matrix(name: &str, text: &str) -> Result<ExpressionMatrix, CoexpError> {
    let mut lines = lines(text).enumerate();
    let header: Vec<&str> = match lines.next() {
        Some((_, line)) => line.split_whitespace().collect(),
        None => {
            return Err(CoexpError::ParseError(format!(
                "{name}: missing header line"
            )));
        }
    };

    let rows: Vec<(usize, Vec<&str>)> = lines
        .map(|(index, line)| (index + 1, line.split_whitespace().collect()))
        .collect();

    // The header names the gene column only when it is as wide as the rows
    let conditions: Vec<String> = match rows.first() {
        Some((_, fields)) if fields.len() == header.len() + 1 => {
            header.iter().map(|s| s.to_string()).collect()
        }
        _ => header.iter().skip(1).map(|s| s.to_string()).collect(),
    };

    let mut genes = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len() * conditions.len());
    for (line_number, fields) in rows {
        if fields.len() != conditions.len() + 1 {
            return Err(CoexpError::ParseError(format!(
                "{name}: line {line_number}: expected a gene name and {} values, got {} fields",
                conditions.len(),
                fields.len()
            )));
        }
        genes.push(fields[0].to_lowercase());
        for field in &fields[1..] {
            values.push(parse_value(field).ok_or_else(|| {
                CoexpError::ParseError(format!(
                    "{name}: line {line_number}: invalid expression value {field:?}"
                ))
            })?);
        }
    }

    ExpressionMatrix::new(name, conditions, genes, values)
}

fn parse_value(field: &str) -> Option<f64> {
    if field.eq_ignore_ascii_case("na") {
        return Some(f64::NAN);
    }
    field.parse().ok()
}
