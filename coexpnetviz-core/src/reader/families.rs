use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use super::{read_text, sanitise_plain_text};
use crate::types::CoexpError;

/// Gene families by family name.
///
/// A gene may occur in multiple families.
pub type GeneFamilies = BTreeMap<String, BTreeSet<String>>;

/// Reads a gene families file.
///
/// Each row is a gene family: `family_name gene1 gene2 ...`, with tabs as
/// separator. Family and gene names are lower-cased.
///
/// The content is sanitised first (see
/// [`sanitise_plain_text`](super::sanitise_plain_text)); the file itself is
/// left untouched.
///
/// # Errors
///
/// Returns [`CoexpError`] if the file cannot be read or is not valid
/// delimited text.
pub fn read_gene_families_file<P: AsRef<Path>>(path: P) -> Result<GeneFamilies, CoexpError> {
    let path = path.as_ref();
    let families = parse_gene_families(&read_text(path)?)?;
    debug!(path = %path.display(), families = families.len(), "Read gene families");
    Ok(families)
}

/// Parses the contents of a gene families file.
///
/// When a family is listed twice, the last row wins. Empty gene fields are
/// skipped.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::reader::parse_gene_families;
///
/// let families = parse_gene_families("Fam1\tAT1G01010\tAT1G01020\nfam2\tat3g01010\n")?;
/// assert_eq!(families.len(), 2);
/// assert!(families["fam1"].contains("at1g01020"));
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
///
/// # Errors
///
/// Returns [`CoexpError::CsvError`] if a row cannot be read.
pub fn parse_gene_families(text: &str) -> Result<GeneFamilies, CoexpError> {
    let text = sanitise_plain_text(text);
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut families = GeneFamilies::new();
    for record in reader.records() {
        let record = record?;
        let mut fields = record.iter();
        let Some(family) = fields.next() else {
            continue;
        };
        let genes = fields
            .filter(|gene| !gene.is_empty())
            .map(str::to_lowercase)
            .collect();
        families.insert(family.to_lowercase(), genes);
    }
    Ok(families)
}

/// Families of each gene, inverse of [`GeneFamilies`].
pub(crate) fn families_by_gene(families: &GeneFamilies) -> BTreeMap<&str, BTreeSet<&str>> {
    let mut by_gene: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (family, genes) in families {
        for gene in genes {
            by_gene.entry(gene.as_str()).or_default().insert(family.as_str());
        }
    }
    by_gene
}
