//! Merging of repeated coordinates
//!
//! Each row is scanned in slot order. A slot whose column was already seen
//! in the same row is folded into that first survivor; survivors are
//! compacted in place as the scan goes, since the write cursor can never
//! overtake the read cursor. An old-slot to new-slot table, filled during
//! the scan, then rewrites the triplet map in one pass.
//!
//! The column lookup never allocates by column count. Short rows compare
//! against the survivors already written; wide rows sort a row-local
//! permutation by column so every slot can find the head of its run.

use std::ops::AddAssign;

use log::debug;
use num_traits::Num;

use crate::matrix::assembly::{AssemblyState, CsrAssembly};
use crate::matrix::config::DedupStrategy;

/// Reusable per-row buffers for the sort-merge lookup
#[derive(Default)]
struct RowScratch {
    /// Row-local slot offsets ordered by column
    perm: Vec<usize>,
    /// Row-local offset of the first slot with the same column
    first: Vec<usize>,
}

impl<T> CsrAssembly<T>
where
    T: Copy + Num + AddAssign,
{
    /// Merges slots sharing a (row, column) coordinate by summing them
    ///
    /// Surviving columns keep the order of their first occurrence. Every
    /// triplet position is redirected to the slot its value was folded
    /// into. Calling this twice is the same as calling it once, and it
    /// does nothing before `compress`.
    pub fn deduplicate(&mut self) {
        if self.state == AssemblyState::Empty || self.is_deduplicated() {
            return;
        }

        let n_rows = self.csr.n_rows;
        let old_nnz = self.csr.nnz();
        let mut remap = vec![0usize; old_nnz];
        let mut scratch = RowScratch::default();

        let mut write = 0;
        let mut start = 0;
        for i in 0..n_rows {
            // row_ptr[i + 1] still holds the old offset at this point
            let end = self.csr.row_ptr[i + 1];

            write = match self.config.strategy_for_width(end - start) {
                DedupStrategy::SortMerge => merge_row_sorted(
                    &mut self.csr.col_idx,
                    &mut self.csr.values,
                    &mut remap,
                    start..end,
                    write,
                    &mut scratch,
                ),
                _ => merge_row_linear(
                    &mut self.csr.col_idx,
                    &mut self.csr.values,
                    &mut remap,
                    start..end,
                    write,
                ),
            };

            self.csr.row_ptr[i + 1] = write;
            start = end;
        }

        self.csr.col_idx.truncate(write);
        self.csr.values.truncate(write);

        for slot in self.slot_of_triplet.iter_mut() {
            *slot = remap[*slot];
        }

        self.state = match self.state {
            AssemblyState::Sorted => AssemblyState::Canonical,
            _ => AssemblyState::Deduplicated,
        };

        debug!("deduplicated {} slots into {}", old_nnz, write);
    }
}

/// Merges one row by comparing against its already compacted survivors
///
/// Returns the write cursor after the row.
fn merge_row_linear<T>(
    col_idx: &mut [usize],
    values: &mut [T],
    remap: &mut [usize],
    row: std::ops::Range<usize>,
    mut write: usize,
) -> usize
where
    T: Copy + AddAssign,
{
    let row_start = write;

    for slot in row {
        let col = col_idx[slot];
        match (row_start..write).find(|&k| col_idx[k] == col) {
            Some(survivor) => {
                let val = values[slot];
                values[survivor] += val;
                remap[slot] = survivor;
            }
            None => {
                col_idx[write] = col;
                values[write] = values[slot];
                remap[slot] = write;
                write += 1;
            }
        }
    }

    write
}

/// Merges one row using a column-ordered permutation of its slots
///
/// Returns the write cursor after the row.
fn merge_row_sorted<T>(
    col_idx: &mut [usize],
    values: &mut [T],
    remap: &mut [usize],
    row: std::ops::Range<usize>,
    mut write: usize,
    scratch: &mut RowScratch,
) -> usize
where
    T: Copy + AddAssign,
{
    let start = row.start;
    let width = row.len();
    let cols = &col_idx[row];

    // Stable, so each run of equal columns starts at its first occurrence
    scratch.perm.clear();
    scratch.perm.extend(0..width);
    scratch.perm.sort_by_key(|&k| cols[k]);

    scratch.first.clear();
    scratch.first.resize(width, 0);
    let mut head = 0;
    for j in 0..width {
        if j > 0 && cols[scratch.perm[j]] != cols[scratch.perm[j - 1]] {
            head = j;
        }
        scratch.first[scratch.perm[j]] = scratch.perm[head];
    }

    for k in 0..width {
        let slot = start + k;
        let first = scratch.first[k];

        if first == k {
            col_idx[write] = col_idx[slot];
            values[write] = values[slot];
            remap[slot] = write;
            write += 1;
        } else {
            // first < k, so its survivor is already placed
            let survivor = remap[start + first];
            let val = values[slot];
            values[survivor] += val;
            remap[slot] = survivor;
        }
    }

    write
}
