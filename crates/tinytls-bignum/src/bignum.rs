//! Big number type and basic operations.

use crate::limb::{Limb, LIMB_BITS, LIMB_BYTES, MAX_LIMBS};
use tinytls_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A heap-allocated big number that is zeroized on drop.
///
/// Internally represented as a little-endian array of `u64` limbs. The sign
/// carried by `negative` is ignored for zero: a zero value always reports
/// itself as non-negative. Limb storage may hold zero limbs above the
/// significant length (after an explicit [`BigNum::grow`]); all arithmetic
/// trims its results back to the significant length.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BigNum {
    /// Little-endian limbs (limbs[0] is the least significant).
    limbs: Vec<Limb>,
    /// True if the number is negative.
    negative: bool,
}

impl BigNum {
    /// Create a zero-valued BigNum.
    pub fn zero() -> Self {
        Self {
            limbs: vec![0],
            negative: false,
        }
    }

    /// Create a BigNum from a `u64` value.
    pub fn from_u64(value: u64) -> Self {
        Self {
            limbs: vec![value],
            negative: false,
        }
    }

    /// Create a BigNum from a signed `i64` value.
    pub fn from_i64(value: i64) -> Self {
        Self {
            limbs: vec![value.unsigned_abs()],
            negative: value < 0,
        }
    }

    /// Create a BigNum from a limb vector (little-endian), non-negative.
    pub(crate) fn from_limbs(limbs: Vec<Limb>) -> Self {
        let mut bn = Self {
            limbs,
            negative: false,
        };
        if bn.limbs.is_empty() {
            bn.limbs.push(0);
        }
        bn.normalize();
        bn
    }

    /// Create a BigNum from big-endian bytes (non-negative magnitude).
    ///
    /// Fails with `BnSpaceNotEnough` if the input would exceed the limb
    /// ceiling.
    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Ok(Self::zero());
        }

        let num_limbs = bytes.len().div_ceil(LIMB_BYTES);
        if num_limbs > MAX_LIMBS {
            return Err(CryptoError::BnSpaceNotEnough);
        }
        let mut limbs = vec![0 as Limb; num_limbs];

        for (i, &byte) in bytes.iter().rev().enumerate() {
            let limb_idx = i / LIMB_BYTES;
            let bit_pos = (i % LIMB_BYTES) * 8;
            limbs[limb_idx] |= (byte as Limb) << bit_pos;
        }

        let mut bn = Self {
            limbs,
            negative: false,
        };
        bn.normalize();
        Ok(bn)
    }

    /// Export the magnitude to big-endian bytes, minimal length.
    ///
    /// Zero exports as a single `0x00` byte.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let bits = self.bit_len();
        if bits == 0 {
            return vec![0];
        }

        let num_bytes = bits.div_ceil(8);
        let mut bytes = vec![0u8; num_bytes];

        for i in 0..num_bytes {
            let limb_idx = i / LIMB_BYTES;
            let bit_pos = (i % LIMB_BYTES) * 8;
            bytes[num_bytes - 1 - i] = (self.limbs[limb_idx] >> bit_pos) as u8;
        }

        bytes
    }

    /// Export the magnitude to exactly `out_len` big-endian bytes,
    /// zero-padded on the left.
    ///
    /// Fails with `BufferTooSmall` carrying the required length when
    /// `out_len` cannot hold the magnitude.
    pub fn to_bytes_be_padded(&self, out_len: usize) -> Result<Vec<u8>, CryptoError> {
        let need = self.byte_len();
        if out_len < need {
            return Err(CryptoError::BufferTooSmall {
                need,
                got: out_len,
            });
        }

        let mut bytes = vec![0u8; out_len];
        for i in 0..need {
            let limb_idx = i / LIMB_BYTES;
            let bit_pos = (i % LIMB_BYTES) * 8;
            bytes[out_len - 1 - i] = (self.limbs[limb_idx] >> bit_pos) as u8;
        }
        Ok(bytes)
    }

    /// Return the number of significant bits (0 for zero).
    pub fn bit_len(&self) -> usize {
        for i in (0..self.limbs.len()).rev() {
            if self.limbs[i] != 0 {
                return i * LIMB_BITS + (LIMB_BITS - self.limbs[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Return the index of the lowest set bit (0 for zero).
    pub fn trailing_zeros(&self) -> usize {
        for (i, &limb) in self.limbs.iter().enumerate() {
            if limb != 0 {
                return i * LIMB_BITS + limb.trailing_zeros() as usize;
            }
        }
        0
    }

    /// Return the magnitude size in bytes.
    pub fn byte_len(&self) -> usize {
        self.bit_len().div_ceil(8)
    }

    /// Return the number of limbs currently held.
    pub fn num_limbs(&self) -> usize {
        self.limbs.len()
    }

    /// Return bit `index` of the magnitude.
    pub fn bit(&self, index: usize) -> bool {
        let limb_idx = index / LIMB_BITS;
        if limb_idx >= self.limbs.len() {
            return false;
        }
        (self.limbs[limb_idx] >> (index % LIMB_BITS)) & 1 == 1
    }

    /// Set bit `index` of the magnitude, growing storage as needed.
    pub fn set_bit(&mut self, index: usize, value: bool) -> Result<(), CryptoError> {
        let limb_idx = index / LIMB_BITS;
        if value {
            self.grow(limb_idx + 1)?;
            self.limbs[limb_idx] |= 1 << (index % LIMB_BITS);
        } else if limb_idx < self.limbs.len() {
            self.limbs[limb_idx] &= !(1 << (index % LIMB_BITS));
            self.normalize();
        }
        Ok(())
    }

    /// Ensure at least `limbs` limbs of storage, preserving the value.
    ///
    /// Newly acquired limbs are zero. Fails with `BnSpaceNotEnough` past
    /// the limb ceiling.
    pub fn grow(&mut self, limbs: usize) -> Result<(), CryptoError> {
        if limbs > MAX_LIMBS {
            return Err(CryptoError::BnSpaceNotEnough);
        }
        if limbs > self.limbs.len() {
            self.limbs.resize(limbs, 0);
        }
        Ok(())
    }

    /// Return true if this number is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// Return true if this number is one.
    pub fn is_one(&self) -> bool {
        !self.negative && self.limbs[0] == 1 && self.limbs[1..].iter().all(|&l| l == 0)
    }

    /// Return true if the low bit is set.
    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    /// Return true if the low bit is clear.
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Return true if this number is negative (zero is never negative).
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Return the magnitude of this number.
    pub fn abs(&self) -> BigNum {
        let mut r = self.clone();
        r.negative = false;
        r
    }

    /// Return the limbs as a slice.
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Set the sign.
    pub fn set_negative(&mut self, neg: bool) {
        self.negative = neg;
    }

    /// Remove leading zero limbs and fix the sign of zero.
    pub(crate) fn normalize(&mut self) {
        while self.limbs.len() > 1 && *self.limbs.last().unwrap() == 0 {
            self.limbs.pop();
        }
        if self.is_zero() {
            self.negative = false;
        }
    }
}

impl std::fmt::Debug for BigNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        f.write_str("0x")?;
        // Limb-wise hex, most significant first; interior limbs keep their
        // zero padding, the leading limb does not.
        let mut limbs = self.limbs.iter().rev().skip_while(|&&l| l == 0);
        match limbs.next() {
            Some(first) => {
                write!(f, "{first:X}")?;
                for limb in limbs {
                    write!(f, "{limb:016X}")?;
                }
            }
            None => f.write_str("0")?,
        }
        Ok(())
    }
}

impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for BigNum {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_queries() {
        let z = BigNum::zero();
        assert!(z.is_zero());
        assert!(z.is_even());
        assert!(!z.is_negative());
        assert_eq!(z.bit_len(), 0);
        assert_eq!(z.trailing_zeros(), 0);
        assert_eq!(z.byte_len(), 0);
        assert_eq!(z.to_bytes_be(), vec![0]);
    }

    #[test]
    fn test_constructors() {
        assert_eq!(BigNum::from_u64(0xFF).bit_len(), 8);
        assert_eq!(BigNum::from_u64(u64::MAX).bit_len(), 64);
        assert!(BigNum::from_u64(0).is_zero());

        let n = BigNum::from_i64(-42);
        assert!(n.is_negative());
        assert_eq!(n.abs(), BigNum::from_u64(42));
        assert_eq!(BigNum::from_i64(i64::MIN).abs().bit_len(), 64);
        assert!(!BigNum::from_i64(0).is_negative());
    }

    #[test]
    fn test_bytes_roundtrip_across_limb_boundaries() {
        // Lengths straddling the 8-byte limb width.
        for len in [1usize, 7, 8, 9, 15, 16, 17, 24] {
            let bytes: Vec<u8> = (0..len).map(|i| (0xB1 ^ i as u8) | 1).collect();
            let n = BigNum::from_bytes_be(&bytes).unwrap();
            assert_eq!(n.to_bytes_be(), bytes, "len {len}");
            assert_eq!(n.byte_len(), len);
        }
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", BigNum::zero()), "0x0");
        assert_eq!(format!("{:?}", BigNum::from_u64(255)), "0xFF");
        assert_eq!(format!("{:?}", BigNum::from_i64(-255)), "-0xFF");
        // Interior limb keeps its zero padding.
        let n = BigNum::from_u64(1).shl(64).unwrap().add_i64(2).unwrap();
        assert_eq!(format!("{n:?}"), "0x10000000000000002");
    }

    #[test]
    fn test_leading_zero_bytes_stripped() {
        let n = BigNum::from_bytes_be(&[0x00, 0x00, 0x12, 0x34]).unwrap();
        assert_eq!(n.to_bytes_be(), vec![0x12, 0x34]);
        assert_eq!(n.byte_len(), 2);
    }

    #[test]
    fn test_padded_export() {
        let n = BigNum::from_u64(0x0102);
        let out = n.to_bytes_be_padded(4).unwrap();
        assert_eq!(out, vec![0x00, 0x00, 0x01, 0x02]);

        match n.to_bytes_be_padded(1) {
            Err(CryptoError::BufferTooSmall { need, got }) => {
                assert_eq!(need, 2);
                assert_eq!(got, 1);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn test_padded_export_zero() {
        let z = BigNum::zero();
        assert_eq!(z.to_bytes_be_padded(3).unwrap(), vec![0, 0, 0]);
        assert_eq!(z.to_bytes_be_padded(0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_bit_queries() {
        let n = BigNum::from_u64(0b1010_0000);
        assert_eq!(n.bit_len(), 8);
        assert_eq!(n.trailing_zeros(), 5);
        assert!(n.bit(5));
        assert!(!n.bit(6));
        assert!(n.bit(7));
        assert!(!n.bit(200));
    }

    #[test]
    fn test_set_bit() {
        let mut n = BigNum::zero();
        n.set_bit(130, true).unwrap();
        assert_eq!(n.bit_len(), 131);
        assert!(n.bit(130));
        n.set_bit(130, false).unwrap();
        assert!(n.is_zero());
        assert_eq!(n.num_limbs(), 1);
    }

    #[test]
    fn test_grow_preserves_value() {
        let mut n = BigNum::from_u64(99);
        n.grow(4).unwrap();
        assert_eq!(n.num_limbs(), 4);
        assert_eq!(n, BigNum::from_u64(99));
        assert!(n.grow(MAX_LIMBS + 1).is_err());
    }

    #[test]
    fn test_from_bytes_over_limit() {
        let bytes = vec![1u8; MAX_LIMBS * LIMB_BYTES + 1];
        assert!(matches!(
            BigNum::from_bytes_be(&bytes),
            Err(CryptoError::BnSpaceNotEnough)
        ));
    }

    #[test]
    fn test_eq_ignores_capacity() {
        let mut a = BigNum::from_u64(7);
        a.grow(5).unwrap();
        assert_eq!(a, BigNum::from_u64(7));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let mut z = BigNum::zero();
        z.set_negative(true);
        assert!(!z.is_negative());
        assert_eq!(z, BigNum::zero());
    }

    #[test]
    fn test_is_one() {
        assert!(BigNum::from_u64(1).is_one());
        assert!(!BigNum::from_i64(-1).is_one());
        assert!(!BigNum::zero().is_one());
    }
}
