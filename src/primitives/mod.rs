//! Core numeric types.

mod sparse;

pub use sparse::SparseMatrix;
