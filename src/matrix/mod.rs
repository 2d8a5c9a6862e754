// Matrix data structures and assembly operations

pub mod assembly;
pub mod config;
pub mod csr;
mod dedup;
mod order;
mod refresh;

pub use assembly::{AssemblyState, CsrAssembly};
pub use config::{AssemblyConfig, DedupStrategy, SystemParameters};
pub use csr::SparseMatrixCSR;
