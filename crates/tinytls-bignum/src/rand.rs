//! Random big number generation.

use crate::bignum::BigNum;
use tinytls_types::CryptoError;

/// A caller-supplied source of random bytes.
///
/// Probabilistic operations take the source as an explicit capability so
/// callers control where entropy comes from (and tests can inject a
/// deterministic one). Failures surface as `BnRandGenFail` instead of
/// panicking.
pub trait RandomSource {
    /// Fill `buf` entirely with random bytes.
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), CryptoError>;
}

/// OS-backed randomness.
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::getrandom(buf).map_err(|_| CryptoError::BnRandGenFail)
    }
}

impl BigNum {
    /// Fill a BigNum with `size` random bytes, interpreted big-endian.
    pub fn fill_random(
        size: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<BigNum, CryptoError> {
        let mut buf = vec![0u8; size];
        rng.fill_bytes(&mut buf)?;
        BigNum::from_bytes_be(&buf)
    }

    /// Generate a random BigNum uniformly in [0, upper).
    ///
    /// Uses rejection sampling with the excess high bits masked off, so no
    /// reduction bias is introduced.
    pub fn random_below(
        upper: &BigNum,
        rng: &mut dyn RandomSource,
    ) -> Result<BigNum, CryptoError> {
        if upper.is_zero() || upper.is_negative() {
            return Err(CryptoError::InvalidArg);
        }

        let bits = upper.bit_len();
        let num_bytes = bits.div_ceil(8);
        let excess = num_bytes * 8 - bits;

        loop {
            let mut buf = vec![0u8; num_bytes];
            rng.fill_bytes(&mut buf)?;
            if excess > 0 {
                buf[0] &= 0xFF >> excess;
            }

            let candidate = BigNum::from_bytes_be(&buf)?;
            if candidate.cmp_abs(upper) == std::cmp::Ordering::Less {
                return Ok(candidate);
            }
        }
    }
}
