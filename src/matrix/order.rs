//! In-row column ordering

use std::ops::AddAssign;

use log::debug;
use num_traits::Num;

use crate::matrix::assembly::{AssemblyState, CsrAssembly};

impl<T> CsrAssembly<T>
where
    T: Copy + Num + AddAssign,
{
    /// Sorts every row's slots by ascending column
    ///
    /// Values move with their columns and the triplet map follows each
    /// slot to its new position. Rows that are already ascending are left
    /// alone. The sort is stable, so repeated columns of a matrix that was
    /// not deduplicated end up adjacent in their original relative order.
    pub fn sort(&mut self) {
        if self.state == AssemblyState::Empty || self.is_sorted() {
            return;
        }

        let nnz = self.csr.nnz();
        let mut remap: Vec<usize> = (0..nnz).collect();
        let mut perm: Vec<usize> = Vec::new();
        let mut col_buf: Vec<usize> = Vec::new();
        let mut val_buf: Vec<T> = Vec::new();
        let mut rows_permuted = 0;

        for i in 0..self.csr.n_rows {
            let start = self.csr.row_ptr[i];
            let end = self.csr.row_ptr[i + 1];
            let cols = &self.csr.col_idx[start..end];

            if cols.windows(2).all(|w| w[0] <= w[1]) {
                continue;
            }

            perm.clear();
            perm.extend(0..end - start);
            perm.sort_by_key(|&k| cols[k]);

            col_buf.clear();
            val_buf.clear();
            for (j, &k) in perm.iter().enumerate() {
                col_buf.push(cols[k]);
                val_buf.push(self.csr.values[start + k]);
                remap[start + k] = start + j;
            }

            self.csr.col_idx[start..end].copy_from_slice(&col_buf);
            self.csr.values[start..end].copy_from_slice(&val_buf);
            rows_permuted += 1;
        }

        if rows_permuted > 0 {
            for slot in self.slot_of_triplet.iter_mut() {
                *slot = remap[*slot];
            }
        }

        self.state = match self.state {
            AssemblyState::Deduplicated => AssemblyState::Canonical,
            _ => AssemblyState::Sorted,
        };

        debug!(
            "sorted {} of {} rows ({} slots)",
            rows_permuted, self.csr.n_rows, nnz
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembled() -> CsrAssembly<f64> {
        let rows = [0, 0, 1, 2, 1, 0, 0];
        let cols = [0, 2, 1, 2, 0, 1, 0];
        let vals = [2.4, 0.6, 3.1, 5.0, 0.5, 4.5, 1.1];
        let mut a = CsrAssembly::new(3, 3, rows.len());
        a.compress(&rows, &cols, &vals).unwrap();
        a
    }

    #[test]
    fn test_sort_after_deduplicate() {
        let mut a = assembled();
        a.deduplicate();
        a.sort();

        assert_eq!(a.state(), AssemblyState::Canonical);
        assert_eq!(a.row_ptr(), &[0, 3, 5, 6]);
        assert_eq!(a.col_idx(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(a.values(), &[3.5, 4.5, 0.6, 0.5, 3.1, 5.0]);
        assert_eq!(a.slot_of_triplet(), &[0, 2, 4, 5, 3, 1, 0]);
        assert!(a.as_csr().has_sorted_indices());
    }

    #[test]
    fn test_sort_without_deduplicate_keeps_repeats_adjacent() {
        let mut a = assembled();
        a.sort();

        assert_eq!(a.state(), AssemblyState::Sorted);
        assert_eq!(a.col_idx(), &[0, 0, 1, 2, 0, 1, 2]);
        assert_eq!(a.values(), &[2.4, 1.1, 4.5, 0.6, 0.5, 3.1, 5.0]);
        assert_eq!(a.slot_of_triplet(), &[0, 3, 5, 6, 4, 2, 1]);

        // Merging afterwards keeps the rows ascending
        a.deduplicate();
        assert_eq!(a.state(), AssemblyState::Canonical);
        assert_eq!(a.col_idx(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(a.values(), &[3.5, 4.5, 0.6, 0.5, 3.1, 5.0]);
        assert_eq!(a.slot_of_triplet(), &[0, 2, 4, 5, 3, 1, 0]);
    }

    #[test]
    fn test_sort_twice_is_noop() {
        let mut a = assembled();
        a.deduplicate();
        a.sort();
        let values = a.values().to_vec();
        let slots = a.slot_of_triplet().to_vec();
        a.sort();
        assert_eq!(a.values(), &values[..]);
        assert_eq!(a.slot_of_triplet(), &slots[..]);
    }
}
