//! Value refresh over a fixed sparsity pattern
//!
//! Once a pattern is assembled, a new round of values costs one pass over
//! the triplets: every slot is zeroed and each triplet's value is added
//! into the slot it maps to. No counting, merging or sorting is repeated.

use std::ops::AddAssign;

use log::trace;
use num_traits::Num;
use rayon::prelude::*;

use crate::error::{AssemblyError, Result};
use crate::matrix::assembly::CsrAssembly;

impl<T> CsrAssembly<T>
where
    T: Copy + Num + AddAssign,
{
    /// Recomputes every slot from one new value per triplet position
    ///
    /// `values` must follow the positional order of the triplets passed to
    /// `compress`. Only its length can be checked here; see
    /// [`CsrAssembly::update_checked`] for a variant that verifies the
    /// pattern as well.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::NotAssembled`] before `compress`, and
    /// [`AssemblyError::LengthMismatch`] if `values.len() != n_triplets`.
    pub fn update(&mut self, values: &[T]) -> Result<()> {
        self.ensure_assembled()?;
        self.check_len("values", values.len())?;

        self.accumulate(values);
        Ok(())
    }

    /// Like [`CsrAssembly::update`], but first checks that each triplet's
    /// coordinate matches the slot it maps to
    ///
    /// The check uses the triplet map itself: slot `slot_of_triplet[p]`
    /// must lie in row `rows[p]` and hold column `cols[p]`. Nothing is
    /// modified if any position disagrees.
    pub fn update_checked(&mut self, rows: &[usize], cols: &[usize], values: &[T]) -> Result<()> {
        self.ensure_assembled()?;
        self.validate_triplets(rows, cols)?;
        self.check_len("values", values.len())?;

        let row_ptr = &self.csr.row_ptr;
        let col_idx = &self.csr.col_idx;
        let mismatch = rows
            .iter()
            .zip(cols)
            .zip(&self.slot_of_triplet)
            .position(|((&row, &col), &slot)| {
                col_idx[slot] != col || slot < row_ptr[row] || slot >= row_ptr[row + 1]
            });

        if let Some(position) = mismatch {
            return Err(AssemblyError::PatternMismatch { position });
        }

        self.accumulate(values);
        Ok(())
    }

    /// Sequential zero-then-accumulate over the triplet map
    fn accumulate(&mut self, values: &[T]) {
        let slots = &mut self.csr.values;
        slots.iter_mut().for_each(|v| *v = T::zero());

        for (&slot, &val) in self.slot_of_triplet.iter().zip(values) {
            slots[slot] += val;
        }

        trace!("refreshed {} slots from {} triplets", slots.len(), values.len());
    }
}

impl<T> CsrAssembly<T>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    /// Parallel version of [`CsrAssembly::update`]
    ///
    /// The triplets are split into one chunk per configured thread. Each
    /// chunk sums into a private slot buffer and the buffers are added
    /// together afterwards, so no two threads ever write the same slot.
    /// Falls back to the sequential path below
    /// `parallel_update_min_triplets`.
    ///
    /// Floating-point sums may differ from `update` in the last bits since
    /// the order of additions depends on the split.
    pub fn par_update(&mut self, values: &[T]) -> Result<()> {
        self.ensure_assembled()?;
        self.check_len("values", values.len())?;

        let n_threads = self.config.system_params.n_threads;
        if self.n_triplets < self.config.parallel_update_min_triplets || n_threads <= 1 {
            self.accumulate(values);
            return Ok(());
        }

        let nnz = self.csr.nnz();
        let chunk_size = ((self.n_triplets + n_threads - 1) / n_threads).max(1);

        let summed = self
            .slot_of_triplet
            .par_chunks(chunk_size)
            .zip(values.par_chunks(chunk_size))
            .fold(
                || vec![T::zero(); nnz],
                |mut buf, (slots, vals)| {
                    for (&slot, &val) in slots.iter().zip(vals) {
                        buf[slot] += val;
                    }
                    buf
                },
            )
            .reduce(
                || vec![T::zero(); nnz],
                |mut acc, buf| {
                    for (a, b) in acc.iter_mut().zip(buf) {
                        *a += b;
                    }
                    acc
                },
            );

        self.csr.values = summed;
        trace!(
            "refreshed {} slots from {} triplets on {} threads",
            nnz, self.n_triplets, n_threads
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::config::AssemblyConfig;

    const ROWS: [usize; 7] = [0, 0, 1, 2, 1, 0, 0];
    const COLS: [usize; 7] = [0, 2, 1, 2, 0, 1, 0];
    const VALS: [f64; 7] = [2.4, 0.6, 3.1, 5.0, 0.5, 4.5, 1.1];
    const NEW_VALS: [f64; 7] = [4.8, 1.2, 6.2, 10.0, 1.0, 9.0, 2.2];

    fn canonical(config: AssemblyConfig) -> CsrAssembly<f64> {
        let mut a = CsrAssembly::with_config(3, 3, 7, config);
        a.compress(&ROWS, &COLS, &VALS).unwrap();
        a.deduplicate();
        a.sort();
        a
    }

    #[test]
    fn test_update_after_canonicalization() {
        let mut a = canonical(AssemblyConfig::default());
        a.update(&NEW_VALS).unwrap();

        assert_eq!(a.row_ptr(), &[0, 3, 5, 6]);
        assert_eq!(a.col_idx(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(a.values(), &[7.0, 9.0, 1.2, 1.0, 6.2, 10.0]);
    }

    #[test]
    fn test_update_on_raw_compression() {
        let mut a = CsrAssembly::new(3, 3, 7);
        a.compress(&ROWS, &COLS, &VALS).unwrap();
        a.update(&NEW_VALS).unwrap();
        assert_eq!(a.values(), &[4.8, 1.2, 9.0, 2.2, 6.2, 1.0, 10.0]);
    }

    #[test]
    fn test_update_errors() {
        let mut a = CsrAssembly::<f64>::new(3, 3, 7);
        assert_eq!(a.update(&NEW_VALS), Err(AssemblyError::NotAssembled));

        let mut a = canonical(AssemblyConfig::default());
        let before = a.values().to_vec();
        assert_eq!(
            a.update(&NEW_VALS[..5]),
            Err(AssemblyError::length("values", 7, 5))
        );
        assert_eq!(a.values(), &before[..]);
    }

    #[test]
    fn test_update_checked_rejects_reordered_pattern() {
        let mut a = canonical(AssemblyConfig::default());
        let before = a.values().to_vec();

        // Swap two triplets with different coordinates
        let mut rows = ROWS;
        let mut cols = COLS;
        rows.swap(1, 2);
        cols.swap(1, 2);
        assert_eq!(
            a.update_checked(&rows, &cols, &NEW_VALS),
            Err(AssemblyError::PatternMismatch { position: 1 })
        );
        assert_eq!(a.values(), &before[..]);

        a.update_checked(&ROWS, &COLS, &NEW_VALS).unwrap();
        assert_eq!(a.values(), &[7.0, 9.0, 1.2, 1.0, 6.2, 10.0]);
    }

    #[test]
    fn test_update_checked_allows_swapping_duplicates() {
        // Positions 0 and 6 share (0, 0), so swapping them is still valid
        let mut a = canonical(AssemblyConfig::default());
        let mut rows = ROWS;
        let mut cols = COLS;
        rows.swap(0, 6);
        cols.swap(0, 6);
        assert!(a.update_checked(&rows, &cols, &NEW_VALS).is_ok());
    }

    #[test]
    fn test_par_update_matches_update() {
        let config = AssemblyConfig::default()
            .with_threads(3)
            .with_parallel_update_min_triplets(0);
        let mut par = canonical(config);
        let mut seq = canonical(AssemblyConfig::default());

        let vals = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        par.par_update(&vals).unwrap();
        seq.update(&vals).unwrap();
        assert_eq!(par.values(), seq.values());
        assert_eq!(par.values(), &[8.0, 6.0, 2.0, 5.0, 3.0, 4.0]);
    }
}
