use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::CoexpError;

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid newline regex"));
static TAB_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+").expect("valid tab regex"));

/// Sanitises plain text.
///
/// - Removes null characters
/// - Normalises newlines to `\n` and drops empty lines
/// - Replaces runs of tabs by a single tab
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::reader::sanitise_plain_text;
///
/// assert_eq!(sanitise_plain_text("a\t\tb\r\n\r\nc\0d\n"), "a\tb\ncd\n");
/// ```
pub fn sanitise_plain_text(text: &str) -> String {
    let text = text.replace('\0', "");
    let text = NEWLINE_RUNS.replace_all(&text, "\n");
    let text = TAB_RUNS.replace_all(&text, "\t");
    text.trim_start_matches('\n').to_string()
}

/// Sanitises a plain text file in place.
///
/// See [`sanitise_plain_text`] for the applied rules.
///
/// # Errors
///
/// Returns [`CoexpError::IoError`] if the file cannot be read or rewritten.
pub fn sanitise_plain_text_file<P: AsRef<Path>>(path: P) -> Result<(), CoexpError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let sanitised = sanitise_plain_text(&String::from_utf8_lossy(&bytes));
    fs::write(path, sanitised)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_removes_nulls() {
        assert_eq!(sanitise_plain_text("a\0b\0\0"), "ab");
    }

    #[test]
    fn test_collapses_newlines() {
        assert_eq!(sanitise_plain_text("\r\n\na\r\rb\n\n\nc"), "a\nb\nc");
    }

    #[test]
    fn test_collapses_tabs() {
        assert_eq!(sanitise_plain_text("fam\t\t\tg1\tg2\t\t"), "fam\tg1\tg2\t");
    }

    #[test]
    fn test_keeps_clean_text() {
        let clean = "fam1\tg1\tg2\nfam2\tg3\n";
        assert_eq!(sanitise_plain_text(clean), clean);
    }

    #[test]
    fn test_sanitise_file_in_place() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), b"x\t\ty\r\n\r\nz\0\n").unwrap();

        sanitise_plain_text_file(file.path()).unwrap();

        assert_eq!(fs::read_to_string(file.path()).unwrap(), "x\ty\nz\n");
    }

    #[test]
    fn test_sanitise_missing_file() {
        let result = sanitise_plain_text_file("nonexistent_file.txt");
        assert!(matches!(result, Err(CoexpError::IoError(_))));
    }
}
