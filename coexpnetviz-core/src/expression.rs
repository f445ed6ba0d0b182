use std::collections::HashMap;

use crate::types::CoexpError;

/// Gene expression matrix.
///
/// `matrix[i][j]` is the expression of gene `i` under condition `j`. Values
/// are stored row-major; missing values are `NaN`.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::expression::ExpressionMatrix;
///
/// let matrix = ExpressionMatrix::new(
///     "leaf",
///     vec!["c1".into(), "c2".into()],
///     vec!["g1".into(), "g2".into()],
///     vec![1.0, 2.0, 3.0, 4.0],
/// )?;
/// assert_eq!(matrix.row("g2"), Some(&[3.0, 4.0][..]));
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionMatrix {
    name: String,
    conditions: Vec<String>,
    genes: Vec<String>,
    values: Vec<f64>,
    gene_to_row: HashMap<String, usize>,
}

impl ExpressionMatrix {
    /// Creates a matrix from row-major `values`.
    ///
    /// # Errors
    ///
    /// Returns [`CoexpError::ParseError`] if `values` does not hold exactly one
    /// value per gene and condition, or if a gene occurs twice.
    pub fn new(
        name: impl Into<String>,
        conditions: Vec<String>,
        genes: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self, CoexpError> {
        let name = name.into();
        if values.len() != genes.len() * conditions.len() {
            return Err(CoexpError::ParseError(format!(
                "{name}: expected {} values ({} genes x {} conditions), got {}",
                genes.len() * conditions.len(),
                genes.len(),
                conditions.len(),
                values.len()
            )));
        }

        let mut gene_to_row = HashMap::with_capacity(genes.len());
        for (row, gene) in genes.iter().enumerate() {
            if gene_to_row.insert(gene.clone(), row).is_some() {
                return Err(CoexpError::ParseError(format!(
                    "{name}: gene {gene} occurs more than once"
                )));
            }
        }

        Ok(Self {
            name,
            conditions,
            genes,
            values,
            gene_to_row,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Number of genes (rows).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene_index(&self, gene: &str) -> Option<usize> {
        self.gene_to_row.get(gene).copied()
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.gene_to_row.contains_key(gene)
    }

    /// Expression values of the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn row_at(&self, index: usize) -> &[f64] {
        let width = self.conditions.len();
        &self.values[index * width..(index + 1) * width]
    }

    pub fn row(&self, gene: &str) -> Option<&[f64]> {
        self.gene_index(gene).map(|index| self.row_at(index))
    }

    /// Iterates over `(gene, row)` pairs in matrix order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.genes
            .iter()
            .enumerate()
            .map(|(index, gene)| (gene.as_str(), self.row_at(index)))
    }
}
