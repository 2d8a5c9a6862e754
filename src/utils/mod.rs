//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs_csr, to_sprs_csr};

/// Computes an exclusive prefix sum of per-bucket counts
///
/// The result has one more entry than the input: `result[i]` is the sum of
/// `input[..i]`, and the last entry is the grand total.
pub fn exclusive_scan(input: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(input.len() + 1);
    let mut sum = 0;
    
    result.push(0);
    
    for &count in input {
        sum += count;
        result.push(sum);
    }
    
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_exclusive_scan() {
        assert_eq!(exclusive_scan(&[4, 2, 1]), vec![0, 4, 6, 7]);
        assert_eq!(exclusive_scan(&[0, 0, 5, 0]), vec![0, 0, 0, 5, 5]);
        assert_eq!(exclusive_scan(&[]), vec![0]);
    }
}
