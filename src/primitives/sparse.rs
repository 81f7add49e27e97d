//! Sparse matrix type for document-feature data.

use serde::{Deserialize, Serialize};

/// A sparse matrix of f64 values in compressed sparse row (CSR) layout.
///
/// Rows are documents, columns are vocabulary terms, and stored values
/// are term frequencies. Only nonzero entries are stored.
///
/// # Examples
///
/// ```
/// use sentir::primitives::SparseMatrix;
///
/// let rows = vec![
///     vec![(0, 2.0), (3, 1.0)],
///     vec![(1, 1.0)],
/// ];
/// let m = SparseMatrix::from_rows(4, rows).expect("entries fit within 4 columns");
/// assert_eq!(m.shape(), (2, 4));
/// assert_eq!(m.get(0, 0), 2.0);
/// assert_eq!(m.get(0, 1), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Creates a sparse matrix from per-row (column, value) entries.
    ///
    /// Entries within a row may be in any order; they are sorted by column.
    /// Zero values are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if any column index is out of bounds or a row
    /// contains a duplicate column.
    pub fn from_rows(
        cols: usize,
        rows: Vec<Vec<(usize, f64)>>,
    ) -> Result<Self, &'static str> {
        let n_rows = rows.len();
        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();

        row_ptr.push(0);
        for mut entries in rows {
            entries.sort_unstable_by_key(|&(col, _)| col);
            let mut prev_col = None;
            for (col, value) in entries {
                if col >= cols {
                    return Err("Column index out of bounds");
                }
                if prev_col == Some(col) {
                    return Err("Duplicate column index within a row");
                }
                prev_col = Some(col);
                if value != 0.0 {
                    col_idx.push(col);
                    values.push(value);
                }
            }
            row_ptr.push(col_idx.len());
        }

        Ok(Self {
            rows: n_rows,
            cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Creates an empty matrix with the given shape (all zeros).
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of stored (nonzero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Gets the element at (row, col), returning 0.0 for unstored entries.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows, "row index out of bounds");
        assert!(col < self.cols, "column index out of bounds");
        let (cols, vals) = self.row_entries(row);
        match cols.binary_search(&col) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Returns the stored entries of a row as parallel (columns, values) slices.
    ///
    /// Columns are in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row_entries(&self, row: usize) -> (&[usize], &[f64]) {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        (&self.col_idx[start..end], &self.values[start..end])
    }

    /// Iterates over the stored (column, value) pairs of a row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (cols, vals) = self.row_entries(row);
        cols.iter().copied().zip(vals.iter().copied())
    }

    /// Returns the sum of stored values in a row.
    #[must_use]
    pub fn row_sum(&self, row: usize) -> f64 {
        let (_, vals) = self.row_entries(row);
        vals.iter().sum()
    }

    /// Builds a new matrix from the selected rows, in the requested order.
    ///
    /// The output stays index-aligned with `indices`: output row i is input
    /// row `indices[i]`. An index may appear more than once.
    ///
    /// # Errors
    ///
    /// Returns an error if any index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, &'static str> {
        let mut row_ptr = Vec::with_capacity(indices.len() + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();

        row_ptr.push(0);
        for &idx in indices {
            if idx >= self.rows {
                return Err("Row index out of bounds");
            }
            let (cols, vals) = self.row_entries(idx);
            col_idx.extend_from_slice(cols);
            values.extend_from_slice(vals);
            row_ptr.push(col_idx.len());
        }

        Ok(Self {
            rows: indices.len(),
            cols: self.cols,
            row_ptr,
            col_idx,
            values,
        })
    }
}

#[cfg(test)]
#[path = "sparse_tests.rs"]
mod tests;
