//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use num_traits::Num;

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Rows are not required to be sorted or free of repeated columns; an
/// assembled matrix passes through both states on its way to canonical form.
#[derive(Clone)]
pub struct SparseMatrixCSR<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,
    
    /// Number of columns in the matrix
    pub n_cols: usize,
    
    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<usize>,
    
    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,
    
    /// Stored values (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Stored values
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    /// - row_ptr must be non-decreasing
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), n_rows + 1, "row_ptr.len() must be n_rows + 1");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");
        assert_eq!(
            row_ptr[n_rows], col_idx.len(),
            "row_ptr[n_rows] must equal col_idx.len()"
        );
        assert!(
            row_ptr.windows(2).all(|w| w[0] <= w[1]),
            "row_ptr must be non-decreasing"
        );
        
        for &col in &col_idx {
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }
        
        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }
    
    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }
    
    /// Returns the number of occupied slots in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
    
    /// Returns the slot range `[start, end)` of row i
    pub fn row_range(&self, i: usize) -> std::ops::Range<usize> {
        assert!(i < self.n_rows, "Row index out of bounds");
        self.row_ptr[i]..self.row_ptr[i + 1]
    }
    
    /// Returns an iterator over the stored elements in row i
    ///
    /// Each item is a tuple (col_idx, value) in slot order
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        let range = self.row_range(i);
        
        self.col_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&col, val)| (col, val))
    }
    
    /// Returns the value at (i, j), summing any repeated slots
    ///
    /// Returns `None` if no slot of row i holds column j.
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        self.row_iter(i)
            .filter(|&(col, _)| col == j)
            .fold(None, |acc, (_, &val)| Some(acc.map_or(val, |sum| sum + val)))
    }
    
    /// Checks that every row holds strictly ascending column indices
    pub fn has_sorted_indices(&self) -> bool {
        (0..self.n_rows).all(|i| {
            self.col_idx[self.row_range(i)]
                .windows(2)
                .all(|w| w[0] < w[1])
        })
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;
        
        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);
        
        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;
            
            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_ptr[i];
                let end = self.row_ptr[i + 1];
                
                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(end - start);
                    
                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.col_idx[j], self.values[j])?;
                    }
                    
                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }
                    
                    writeln!(f)?;
                }
            }
            
            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }
        
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_new_matrix() {
        let matrix = SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
        
        assert_eq!(matrix.n_rows, 3);
        assert_eq!(matrix.n_cols, 3);
        assert_eq!(matrix.nnz(), 5);
        assert!(matrix.has_sorted_indices());
    }
    
    #[test]
    fn test_row_iter() {
        let matrix = SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
        
        let row0: Vec<_> = matrix.row_iter(0).collect();
        assert_eq!(row0, vec![(0, &1), (1, &2)]);
        
        let row2: Vec<_> = matrix.row_iter(2).collect();
        assert_eq!(row2, vec![(0, &4), (2, &5)]);
    }
    
    #[test]
    fn test_get_sums_repeated_slots() {
        // Row 0 holds column 1 twice
        let matrix = SparseMatrixCSR::new(
            2, 2,
            vec![0, 3, 3],
            vec![1, 0, 1],
            vec![1.5, 2.0, 0.5],
        );
        
        assert_eq!(matrix.get(0, 1), Some(2.0));
        assert_eq!(matrix.get(0, 0), Some(2.0));
        assert_eq!(matrix.get(1, 0), None);
        assert!(!matrix.has_sorted_indices());
    }
    
    #[test]
    fn test_zeros() {
        let matrix = SparseMatrixCSR::<f64>::zeros(4, 2);
        assert_eq!(matrix.row_ptr, vec![0; 5]);
        assert_eq!(matrix.nnz(), 0);
        assert_eq!(matrix.row_iter(3).count(), 0);
    }
    
    #[test]
    #[should_panic(expected = "row_ptr.len() must be n_rows + 1")]
    fn test_invalid_row_ptr() {
        SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
    }
    
    #[test]
    #[should_panic(expected = "row_ptr must be non-decreasing")]
    fn test_decreasing_row_ptr() {
        SparseMatrixCSR::new(
            2, 3,
            vec![0, 2, 1],
            vec![0],
            vec![1],
        );
    }
}
