//! features/entropy.rs
//! Byte-distribution entropy.

use crate::constants::MAX_ENTROPY;

/// 256-bucket frequency histogram.
pub fn byte_histogram(data: &[u8]) -> [u64; 256] {
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] += 1;
    }
    freq
}

/// Shannon entropy in bits per byte, `H = -Σ p·log2(p)` over nonzero buckets.
/// Empty input yields `0.0`; the result is always within `[0, 8]`.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let len = data.len() as f64;
    let h: f64 = byte_histogram(data)
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum();

    // normalise -0.0 and rounding overshoot
    if h <= 0.0 {
        0.0
    } else {
        h.min(MAX_ENTROPY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_byte_has_zero_entropy() {
        assert_eq!(shannon_entropy(&[0x41; 4096]), 0.0);
    }

    #[test]
    fn two_symbols_evenly_split_is_one_bit() {
        let data: Vec<u8> = (0..1000).map(|i| if i % 2 == 0 { b'a' } else { b'b' }).collect();
        assert!((shannon_entropy(&data) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_counts_every_byte() {
        let hist = byte_histogram(b"aab");
        assert_eq!(hist[b'a' as usize], 2);
        assert_eq!(hist[b'b' as usize], 1);
        assert_eq!(hist.iter().sum::<u64>(), 3);
    }
}
