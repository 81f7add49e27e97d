use super::*;

fn sample() -> SparseMatrix {
    SparseMatrix::from_rows(
        4,
        vec![
            vec![(0, 2.0), (3, 1.0)],
            vec![],
            vec![(1, 5.0), (2, 3.0), (0, 1.0)],
        ],
    )
    .expect("valid entries")
}

#[test]
fn test_shape_and_nnz() {
    let m = sample();
    assert_eq!(m.shape(), (3, 4));
    assert_eq!(m.n_rows(), 3);
    assert_eq!(m.n_cols(), 4);
    assert_eq!(m.nnz(), 5);
}

#[test]
fn test_get_stored_and_implicit_zero() {
    let m = sample();
    assert_eq!(m.get(0, 0), 2.0);
    assert_eq!(m.get(0, 3), 1.0);
    assert_eq!(m.get(0, 1), 0.0);
    assert_eq!(m.get(1, 2), 0.0);
    assert_eq!(m.get(2, 1), 5.0);
}

#[test]
fn test_entries_sorted_by_column() {
    // Row 2 was given out of order: (1, 5.0), (2, 3.0), (0, 1.0).
    let m = sample();
    let (cols, vals) = m.row_entries(2);
    assert_eq!(cols, &[0, 1, 2]);
    assert_eq!(vals, &[1.0, 5.0, 3.0]);
}

#[test]
fn test_zero_values_dropped() {
    let m = SparseMatrix::from_rows(2, vec![vec![(0, 0.0), (1, 1.0)]]).expect("valid");
    assert_eq!(m.nnz(), 1);
    assert_eq!(m.get(0, 0), 0.0);
}

#[test]
fn test_column_out_of_bounds_rejected() {
    let result = SparseMatrix::from_rows(2, vec![vec![(2, 1.0)]]);
    assert!(result.is_err());
}

#[test]
fn test_duplicate_column_rejected() {
    let result = SparseMatrix::from_rows(3, vec![vec![(1, 1.0), (1, 2.0)]]);
    assert!(result.is_err());
}

#[test]
fn test_row_sum() {
    let m = sample();
    assert_eq!(m.row_sum(0), 3.0);
    assert_eq!(m.row_sum(1), 0.0);
    assert_eq!(m.row_sum(2), 9.0);
}

#[test]
fn test_row_iter() {
    let m = sample();
    let entries: Vec<(usize, f64)> = m.row_iter(0).collect();
    assert_eq!(entries, vec![(0, 2.0), (3, 1.0)]);
}

#[test]
fn test_select_rows_preserves_order() {
    let m = sample();
    let sub = m.select_rows(&[2, 0]).expect("indices in bounds");
    assert_eq!(sub.shape(), (2, 4));
    assert_eq!(sub.get(0, 1), 5.0);
    assert_eq!(sub.get(1, 0), 2.0);
}

#[test]
fn test_select_rows_allows_repeats() {
    let m = sample();
    let sub = m.select_rows(&[0, 0]).expect("indices in bounds");
    assert_eq!(sub.shape(), (2, 4));
    assert_eq!(sub.get(0, 0), sub.get(1, 0));
}

#[test]
fn test_select_rows_out_of_bounds() {
    let m = sample();
    assert!(m.select_rows(&[3]).is_err());
}

#[test]
fn test_select_rows_empty() {
    let m = sample();
    let sub = m.select_rows(&[]).expect("empty selection is valid");
    assert_eq!(sub.shape(), (0, 4));
    assert_eq!(sub.nnz(), 0);
}

#[test]
fn test_zeros() {
    let m = SparseMatrix::zeros(3, 5);
    assert_eq!(m.shape(), (3, 5));
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.get(2, 4), 0.0);
}

#[test]
#[should_panic(expected = "row index out of bounds")]
fn test_get_row_out_of_bounds_panics() {
    let m = sample();
    let _ = m.get(3, 0);
}
