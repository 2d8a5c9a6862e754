//! # Triplet Assembly into CSR
//!
//! [`CsrAssembly`] turns coordinate triplets `(row, col, value)` into
//! compressed-row storage and remembers, for every triplet position, which
//! slot its contribution landed in. That map survives the two structural
//! rewrites that may follow ([`CsrAssembly::deduplicate`] and
//! [`CsrAssembly::sort`]), so later rounds of values for the same pattern
//! can be summed straight into place with [`CsrAssembly::update`].
//!
//! ```
//! use csr_assembly::CsrAssembly;
//!
//! let rows = [0, 0, 1, 0];
//! let cols = [1, 0, 1, 1];
//! let mut a = CsrAssembly::new(2, 2, rows.len());
//!
//! a.compress(&rows, &cols, &[1.0, 2.0, 3.0, 4.0]).unwrap();
//! a.deduplicate();
//! a.sort();
//! assert_eq!(a.row_ptr(), &[0, 2, 3]);
//! assert_eq!(a.col_idx(), &[0, 1, 1]);
//! assert_eq!(a.values(), &[2.0, 5.0, 3.0]);
//!
//! a.update(&[10.0, 20.0, 30.0, 40.0]).unwrap();
//! assert_eq!(a.values(), &[20.0, 50.0, 30.0]);
//! ```
//!
//! ## Refresh contract
//!
//! `update` only checks the length of its input. Values must come in the
//! same positional order as the triplets given to `compress`; anything else
//! silently sums into the wrong slots. Use [`CsrAssembly::update_checked`]
//! when the caller can supply the pattern alongside the values.

use std::fmt;
use std::ops::AddAssign;

use log::debug;
use num_traits::Num;

use crate::error::{AssemblyError, Result};
use crate::matrix::config::AssemblyConfig;
use crate::matrix::SparseMatrixCSR;
use crate::utils::exclusive_scan;

/// Structural stage of an assembled matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    /// No triplets compressed yet
    Empty,
    /// One slot per triplet, rows in input order
    Compressed,
    /// Repeated coordinates merged, rows in first-occurrence order
    Deduplicated,
    /// Rows ascending by column, repeated coordinates still adjacent
    Sorted,
    /// Merged and ascending
    Canonical,
}

/// A CSR matrix assembled from triplets, with a stable triplet-to-slot map
pub struct CsrAssembly<T> {
    /// Compressed storage
    pub(crate) csr: SparseMatrixCSR<T>,

    /// Number of triplets fixed at construction
    pub(crate) n_triplets: usize,

    /// Slot currently holding each triplet's contribution
    pub(crate) slot_of_triplet: Vec<usize>,

    pub(crate) state: AssemblyState,

    pub(crate) config: AssemblyConfig,
}

impl<T> CsrAssembly<T>
where
    T: Copy + Num + AddAssign,
{
    /// Creates an empty assembly with the default configuration
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `n_triplets` - Number of triplets every `compress` and `update` call must supply
    pub fn new(n_rows: usize, n_cols: usize, n_triplets: usize) -> Self {
        Self::with_config(n_rows, n_cols, n_triplets, AssemblyConfig::default())
    }

    /// Creates an empty assembly with an explicit configuration
    pub fn with_config(
        n_rows: usize,
        n_cols: usize,
        n_triplets: usize,
        config: AssemblyConfig,
    ) -> Self {
        Self {
            csr: SparseMatrixCSR::zeros(n_rows, n_cols),
            n_triplets,
            slot_of_triplet: Vec::new(),
            state: AssemblyState::Empty,
            config,
        }
    }

    /// Compresses triplets into CSR layout with a counting sort by row
    ///
    /// Triplets sharing a row keep their relative input order, and repeated
    /// coordinates occupy separate slots. Any previous structure is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Fails without touching the matrix if a sequence does not have
    /// `n_triplets` entries or an index lies outside the matrix.
    pub fn compress(&mut self, rows: &[usize], cols: &[usize], values: &[T]) -> Result<()> {
        self.validate_triplets(rows, cols)?;
        self.check_len("values", values.len())?;

        let n_rows = self.csr.n_rows;
        let nnz = self.n_triplets;

        // Count triplets per row
        let mut cursor = vec![0usize; n_rows];
        for &row in rows {
            cursor[row] += 1;
        }

        let row_ptr = exclusive_scan(&cursor);
        if row_ptr[n_rows] != nnz {
            return Err(AssemblyError::Inconsistent {
                expected: nnz,
                actual: row_ptr[n_rows],
            });
        }

        // Reuse the histogram as per-row write cursors
        cursor.copy_from_slice(&row_ptr[..n_rows]);

        let mut col_idx = vec![0; nnz];
        let mut slot_values = vec![T::zero(); nnz];
        let mut slot_of_triplet = vec![0; nnz];

        for (p, ((&row, &col), &val)) in rows.iter().zip(cols).zip(values).enumerate() {
            let slot = cursor[row];
            col_idx[slot] = col;
            slot_values[slot] = val;
            slot_of_triplet[p] = slot;
            cursor[row] += 1;
        }

        self.csr.row_ptr = row_ptr;
        self.csr.col_idx = col_idx;
        self.csr.values = slot_values;
        self.slot_of_triplet = slot_of_triplet;
        self.state = AssemblyState::Compressed;

        debug!(
            "compressed {} triplets into {}x{} CSR",
            nnz, n_rows, self.csr.n_cols
        );
        Ok(())
    }

    /// Checks index sequences against the matrix shape and triplet count
    pub(crate) fn validate_triplets(&self, rows: &[usize], cols: &[usize]) -> Result<()> {
        self.check_len("rows", rows.len())?;
        self.check_len("cols", cols.len())?;

        let n_rows = self.csr.n_rows;
        let n_cols = self.csr.n_cols;

        if let Some(position) = rows.iter().position(|&row| row >= n_rows) {
            return Err(AssemblyError::RowOutOfBounds {
                position,
                row: rows[position],
                n_rows,
            });
        }
        if let Some(position) = cols.iter().position(|&col| col >= n_cols) {
            return Err(AssemblyError::ColumnOutOfBounds {
                position,
                col: cols[position],
                n_cols,
            });
        }
        Ok(())
    }

    pub(crate) fn check_len(&self, what: &'static str, len: usize) -> Result<()> {
        if len != self.n_triplets {
            return Err(AssemblyError::length(what, self.n_triplets, len));
        }
        Ok(())
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.csr.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.csr.n_cols
    }

    /// Number of triplets fixed at construction
    pub fn n_triplets(&self) -> usize {
        self.n_triplets
    }

    /// Number of occupied slots
    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    /// Row offsets, `n_rows + 1` entries
    pub fn row_ptr(&self) -> &[usize] {
        &self.csr.row_ptr
    }

    /// Column index of every slot
    pub fn col_idx(&self) -> &[usize] {
        &self.csr.col_idx
    }

    /// Value of every slot
    pub fn values(&self) -> &[T] {
        &self.csr.values
    }

    /// Slot holding each triplet's contribution, empty before `compress`
    pub fn slot_of_triplet(&self) -> &[usize] {
        &self.slot_of_triplet
    }

    /// Iterates `(col, &value)` over the slots of row i
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        self.csr.row_iter(i)
    }

    /// Current structural stage
    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// True once repeated coordinates have been merged
    pub fn is_deduplicated(&self) -> bool {
        matches!(
            self.state,
            AssemblyState::Deduplicated | AssemblyState::Canonical
        )
    }

    /// True once every row is ascending by column
    pub fn is_sorted(&self) -> bool {
        matches!(self.state, AssemblyState::Sorted | AssemblyState::Canonical)
    }

    /// Borrows the compressed storage
    pub fn as_csr(&self) -> &SparseMatrixCSR<T> {
        &self.csr
    }

    /// Gives up the triplet map and returns the compressed storage
    pub fn into_csr(self) -> SparseMatrixCSR<T> {
        self.csr
    }

    pub(crate) fn ensure_assembled(&self) -> Result<()> {
        if self.state == AssemblyState::Empty {
            return Err(AssemblyError::NotAssembled);
        }
        Ok(())
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for CsrAssembly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrAssembly")
            .field("state", &self.state)
            .field("n_triplets", &self.n_triplets)
            .field("csr", &self.csr)
            .finish()
    }
}
