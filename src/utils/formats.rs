//! Conversions between our CSR format and sprs

use crate::matrix::SparseMatrixCSR;
use sprs::CsMat;
use num_traits::Num;

/// Converts our CSR matrix format to sprs CsMat format
///
/// # Panics
///
/// sprs only accepts canonical storage: every row ascending with no
/// repeated columns. Deduplicate and sort an assembly before converting.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where 
    T: Copy + Num + Default,
{
    CsMat::new(
        (matrix.n_rows, matrix.n_cols),
        matrix.row_ptr.clone(),
        matrix.col_idx.clone(),
        matrix.values.clone(),
    )
}

/// Converts a sprs CsMat to our SparseMatrixCSR format
///
/// CSC input is converted to CSR first.
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };
    
    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();
    
    SparseMatrixCSR::new(shape.0, shape.1, indptr, indices, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsrAssembly;
    
    #[test]
    fn test_canonical_assembly_to_sprs() {
        let rows = [2, 0, 2, 1, 0];
        let cols = [1, 3, 1, 0, 0];
        let vals = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        
        let mut a = CsrAssembly::new(3, 4, rows.len());
        a.compress(&rows, &cols, &vals).unwrap();
        a.deduplicate();
        a.sort();
        
        let sprs_mat = to_sprs_csr(a.as_csr());
        assert!(sprs_mat.is_csr());
        assert_eq!(sprs_mat.nnz(), 4);
        assert_eq!(sprs_mat.get(0, 0), Some(&5.0));
        assert_eq!(sprs_mat.get(0, 3), Some(&2.0));
        assert_eq!(sprs_mat.get(1, 0), Some(&4.0));
        assert_eq!(sprs_mat.get(2, 1), Some(&4.0));
        assert_eq!(sprs_mat.get(2, 2), None);
    }
    
    #[test]
    fn test_sprs_roundtrip() {
        let original = SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1.0f64, 2.0, 3.0, 4.0, 5.0],
        );
        
        let roundtrip = from_sprs_csr(to_sprs_csr(&original));
        
        assert_eq!(roundtrip.row_ptr, original.row_ptr);
        assert_eq!(roundtrip.col_idx, original.col_idx);
        assert_eq!(roundtrip.values, original.values);
    }
    
    #[test]
    fn test_from_sprs_csc() {
        let mut trip = sprs::TriMat::new((2, 3));
        trip.add_triplet(1, 2, 6.0f64);
        trip.add_triplet(0, 1, 7.0);
        
        let csr = from_sprs_csr(trip.to_csc());
        assert_eq!(csr.row_ptr, vec![0, 1, 2]);
        assert_eq!(csr.col_idx, vec![1, 2]);
        assert_eq!(csr.values, vec![7.0, 6.0]);
    }
}
