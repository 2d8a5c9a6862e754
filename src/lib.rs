//! # csr-assembly: Triplet to CSR assembly with value refresh
//!
//! Sparse systems are often assembled from many independent pieces, each
//! contributing `(row, col, value)` triplets that may overlap. This crate
//! compresses such triplets into Compressed Sparse Row storage and keeps a
//! map from every triplet position to the slot that holds its value.
//!
//! ## Pipeline
//!
//! 1. **Compress**: counting sort by row, one slot per triplet.
//! 2. **Deduplicate** (optional): merge repeated coordinates by summing.
//! 3. **Sort** (optional): order every row by ascending column.
//! 4. **Update** (repeatable): sum a new round of values into the existing
//!    slots without redoing any of the above.
//!
//! The triplet map is rewritten by each structural step, which is what
//! keeps step 4 a single linear pass.
//!
//! ## Usage
//!
//! ```
//! use csr_assembly::CsrAssembly;
//!
//! let rows = [0, 0, 1, 2, 1, 0, 0];
//! let cols = [0, 2, 1, 2, 0, 1, 0];
//! let vals = [2.4, 0.6, 3.1, 5.0, 0.5, 4.5, 1.1];
//!
//! let mut a = CsrAssembly::new(3, 3, rows.len());
//! a.compress(&rows, &cols, &vals).unwrap();
//! a.deduplicate();
//! a.sort();
//! assert_eq!(a.row_ptr(), &[0, 3, 5, 6]);
//! assert_eq!(a.col_idx(), &[0, 1, 2, 0, 1, 2]);
//!
//! // Next time step: same pattern, new values
//! a.update(&[4.8, 1.2, 6.2, 10.0, 1.0, 9.0, 2.2]).unwrap();
//! assert_eq!(a.values(), &[7.0, 9.0, 1.2, 1.0, 6.2, 10.0]);
//! ```

pub mod error;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use error::{AssemblyError, Result};
pub use matrix::{AssemblyConfig, AssemblyState, CsrAssembly, DedupStrategy, SparseMatrixCSR};
pub use matrix::SystemParameters;
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
