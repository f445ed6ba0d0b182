use rayon::prelude::*;

use crate::constants::MIN_CONDITIONS;
use crate::expression::ExpressionMatrix;

/// Pearson correlation coefficient of `x` and `y`.
///
/// Returns `NaN` when the correlation is undefined: rows of different length,
/// fewer than two values, a row without variance, or a `NaN` value.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::analysis::pearson;
///
/// assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
/// assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
/// assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
/// ```
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < MIN_CONDITIONS {
        return f64::NAN;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return f64::NAN;
    }
    (covariance / (variance_x * variance_y).sqrt()).clamp(-1.0, 1.0)
}

/// Correlations between the baits of one expression matrix and all its genes.
///
/// `values[gene][bait]` is the Pearson correlation between gene row `gene` and
/// bait column `bait`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// Name of the expression matrix the correlations were computed on
    pub name: String,
    pub baits: Vec<String>,
    pub genes: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, gene_index: usize, bait_index: usize) -> f64 {
        self.values[gene_index * self.baits.len() + bait_index]
    }

    /// Correlations of the gene at `gene_index` with each bait.
    pub fn row(&self, gene_index: usize) -> &[f64] {
        let width = self.baits.len();
        &self.values[gene_index * width..(gene_index + 1) * width]
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.genes
            .iter()
            .enumerate()
            .map(|(index, gene)| (gene.as_str(), self.row(index)))
    }
}

/// Correlates each bait of `baits` present in `matrix` with every gene of
/// `matrix`.
///
/// Baits absent from the matrix are left out of the result. Rows are computed
/// in parallel.
pub fn correlate_baits(matrix: &ExpressionMatrix, baits: &[String]) -> CorrelationMatrix {
    let bait_rows: Vec<(&String, &[f64])> = baits
        .iter()
        .filter_map(|bait| matrix.row(bait).map(|row| (bait, row)))
        .collect();

    let values: Vec<f64> = (0..matrix.len())
        .into_par_iter()
        .flat_map_iter(|gene_index| {
            let gene_row = matrix.row_at(gene_index);
            bait_rows
                .iter()
                .map(move |(_, bait_row)| pearson(gene_row, bait_row))
        })
        .collect();

    CorrelationMatrix {
        name: matrix.name().to_string(),
        baits: bait_rows.iter().map(|(bait, _)| (*bait).clone()).collect(),
        genes: matrix.genes().to_vec(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn matrix() -> ExpressionMatrix {
        ExpressionMatrix::new(
            "m",
            vec!["c1".into(), "c2".into(), "c3".into(), "c4".into()],
            vec!["b1".into(), "g1".into(), "g2".into(), "flat".into()],
            vec![
                1.0, 2.0, 3.0, 4.0, // b1
                2.0, 4.0, 6.0, 8.0, // g1
                4.0, 3.0, 2.0, 1.0, // g2
                5.0, 5.0, 5.0, 5.0, // flat
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_pearson_known_value() {
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]);
        assert!((r - 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_pearson_undefined() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_correlate_baits() {
        let matrix = matrix();
        let correlations = correlate_baits(&matrix, &["b1".to_string(), "absent".to_string()]);

        assert_eq!(correlations.name, "m");
        assert_eq!(correlations.baits, vec!["b1".to_string()]);
        assert_eq!(correlations.genes.len(), 4);
        assert!((correlations.get(0, 0) - 1.0).abs() < EPSILON);
        assert!((correlations.get(1, 0) - 1.0).abs() < EPSILON);
        assert!((correlations.get(2, 0) + 1.0).abs() < EPSILON);
        assert!(correlations.get(3, 0).is_nan());
        assert_eq!(correlations.rows().count(), 4);
    }

    #[test]
    fn test_correlate_without_baits() {
        let matrix = matrix();
        let correlations = correlate_baits(&matrix, &[]);
        assert!(correlations.baits.is_empty());
        assert_eq!(correlations.row(0), &[] as &[f64]);
    }
}
