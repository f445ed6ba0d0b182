use std::path::Path;

use super::{lines, read_text};
use crate::types::CoexpError;

/// Reads a file of whitespace separated bait gene names.
///
/// Names are returned in file order, as written.
///
/// # Errors
///
/// Returns [`CoexpError::IoError`] if the file cannot be read. Invalid UTF-8
/// is replaced rather than rejected.
pub fn read_baits_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CoexpError> {
    let text = read_text(path.as_ref())?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}

/// Reads a whitespace separated 2D array file.
///
/// Unlike a matrix, rows may differ in length. Lines act as rows, the first
/// dimension; words in a line act as the second dimension, so `array[1][2]`
/// is the third word on the second row.
///
/// Lines are separated by one or more newline characters (any amount of `\r`
/// or `\n`); empty lines are ignored. Words are separated by any whitespace
/// other than newline characters.
///
/// # Errors
///
/// Returns [`CoexpError::IoError`] if the file cannot be read.
pub fn read_whitespace_separated_2d_array_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Vec<String>>, CoexpError> {
    let text = read_text(path.as_ref())?;
    Ok(parse_whitespace_separated_2d_array(&text))
}

/// Parses the contents of a whitespace separated 2D array file.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::reader::parse_whitespace_separated_2d_array;
///
/// let array = parse_whitespace_separated_2d_array("a b c\r\n\r\nd\te\n");
/// assert_eq!(array[1][1], "e");
/// ```
pub fn parse_whitespace_separated_2d_array(text: &str) -> Vec<Vec<String>> {
    lines(text)
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}
