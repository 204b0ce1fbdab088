use crate::aggregate::{AggregatedProfile, TaxonColumns};
use serde::{Serialize, Serializer};

/// Symmetric N×N overlap matrix, stored row-major.
///
/// `m[i][j]` sums `min(p_i[c], p_j[c])` over the columns where both profiles are positive.
/// Values are raw shared abundance; nothing is normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn build(profiles: &[AggregatedProfile], columns: &TaxonColumns) -> Self {
        let n = profiles.len();
        // Dense per-profile values in column order.
        let values: Vec<Vec<f64>> = profiles
            .iter()
            .map(|p| columns.iter().map(|c| p.value(c)).collect())
            .collect();

        let mut cells = vec![0.0; n * n];
        for i in 0..n {
            for j in i..n {
                let mut overlap = 0.0;
                for (a, b) in values[i].iter().zip(&values[j]) {
                    if *a > 0.0 && *b > 0.0 {
                        overlap += a.min(*b);
                    }
                }
                cells[i * n + j] = overlap;
                cells[j * n + i] = overlap;
            }
        }
        Self { n, cells }
    }

    /// Builds from explicit rows. Rows must be square; used by callers that already hold a
    /// matrix (e.g. tests and alternative metrics).
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return None;
        }
        Some(Self {
            n,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Checked cell access; `None` when either index is out of range.
    pub fn try_get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.cells[i * self.n + j])
        } else {
            None
        }
    }

    /// Checked row access; `None` when `i` is out of range.
    pub fn try_row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.cells[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    /// Panics when out of range, like slice indexing. See [`SimilarityMatrix::try_get`].
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "matrix index ({i}, {j}) out of range");
        self.cells[i * self.n + j]
    }

    /// Panics when out of range. See [`SimilarityMatrix::try_row`].
    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    pub fn row_total(&self, i: usize) -> f64 {
        self.row(i).iter().sum()
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

impl Serialize for SimilarityMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}
