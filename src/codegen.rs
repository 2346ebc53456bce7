//! Secure generation of 6-digit numeric codes.

use crate::error::{OtpError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

const RANGE_START: u32 = 100_000;
const RANGE_SIZE: u32 = 900_000;

// Largest multiple of RANGE_SIZE that fits in a u32. Draws at or above this
// are rejected so every code in [100000, 999999] stays equally likely.
const REJECTION_BOUND: u32 = u32::MAX - (u32::MAX % RANGE_SIZE);

/// Generate a 6-digit numeric code, uniform over [100000, 999999].
///
/// Entropy comes from the operating system's secure source. Fails with
/// [`OtpError::RandomnessUnavailable`] if that source cannot be read.
pub fn generate_code() -> Result<String> {
    let mut buf = [0u8; 4];
    loop {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| OtpError::randomness_unavailable(e.to_string()))?;
        let draw = u32::from_le_bytes(buf);
        if draw < REJECTION_BOUND {
            return Ok((RANGE_START + draw % RANGE_SIZE).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_six_ascii_digits() {
        for _ in 0..200 {
            let code = generate_code().unwrap();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_code_within_range() {
        for _ in 0..200 {
            let code = generate_code().unwrap();
            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_codes_vary() {
        // 50 draws from a 900k range colliding into one value would point at a
        // broken source, not bad luck.
        let mut codes: Vec<String> = (0..50).map(|_| generate_code().unwrap()).collect();
        codes.sort();
        codes.dedup();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_rejection_bound_is_multiple_of_range() {
        assert_eq!(REJECTION_BOUND % RANGE_SIZE, 0);
        assert!(u32::MAX - REJECTION_BOUND < RANGE_SIZE);
    }
}
