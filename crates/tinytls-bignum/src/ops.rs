//! Basic arithmetic operations for BigNum.

use crate::bignum::BigNum;
use crate::limb::{muladdc, Limb, LIMB_BITS, MAX_LIMBS};
use std::cmp::Ordering;
use tinytls_types::CryptoError;

impl BigNum {
    /// Compare absolute values.
    pub fn cmp_abs(&self, other: &BigNum) -> Ordering {
        cmp_magnitudes(self.limbs(), other.limbs())
    }

    /// Compare against a signed `i64` value.
    pub fn cmp_i64(&self, value: i64) -> Ordering {
        self.cmp(&BigNum::from_i64(value))
    }

    /// Unsigned addition: |self| + |other|.
    pub fn add_abs(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        checked_magnitude(add_magnitudes(self.limbs(), other.limbs()))
    }

    /// Unsigned subtraction: |self| - |other|.
    ///
    /// Fails with `BnNegativeValue` when |other| is greater than |self|.
    pub fn sub_abs(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        if self.cmp_abs(other) == Ordering::Less {
            return Err(CryptoError::BnNegativeValue);
        }
        Ok(BigNum::from_limbs(sub_magnitudes(
            self.limbs(),
            other.limbs(),
        )))
    }

    /// Signed addition: self + other.
    pub fn add(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        if self.is_negative() == other.is_negative() {
            let mut result = self.add_abs(other)?;
            result.set_negative(self.is_negative());
            result.normalize();
            return Ok(result);
        }
        // Opposite signs: the larger magnitude wins.
        let mut result = match self.cmp_abs(other) {
            Ordering::Less => {
                let mut r = other.sub_abs(self)?;
                r.set_negative(other.is_negative());
                r
            }
            Ordering::Equal => BigNum::zero(),
            Ordering::Greater => {
                let mut r = self.sub_abs(other)?;
                r.set_negative(self.is_negative());
                r
            }
        };
        result.normalize();
        Ok(result)
    }

    /// Signed subtraction: self - other.
    pub fn sub(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        let mut negated = other.clone();
        negated.set_negative(!other.is_negative());
        self.add(&negated)
    }

    /// Signed addition against an `i64`: self + value.
    pub fn add_i64(&self, value: i64) -> Result<BigNum, CryptoError> {
        self.add(&BigNum::from_i64(value))
    }

    /// Signed subtraction against an `i64`: self - value.
    pub fn sub_i64(&self, value: i64) -> Result<BigNum, CryptoError> {
        self.sub(&BigNum::from_i64(value))
    }

    /// Multiply: self * other.
    pub fn mul(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        if self.is_zero() || other.is_zero() {
            return Ok(BigNum::zero());
        }
        let mut result = checked_magnitude(mul_magnitudes(self.limbs(), other.limbs()))?;
        result.set_negative(self.is_negative() != other.is_negative());
        result.normalize();
        Ok(result)
    }

    /// Multiply by an `i64`: self * value.
    pub fn mul_i64(&self, value: i64) -> Result<BigNum, CryptoError> {
        self.mul(&BigNum::from_i64(value))
    }

    /// Multiply the magnitude by a single limb, keeping the sign.
    pub fn mul_u64(&self, value: u64) -> Result<BigNum, CryptoError> {
        if self.is_zero() || value == 0 {
            return Ok(BigNum::zero());
        }
        let mut result = checked_magnitude(mul_magnitudes(self.limbs(), &[value]))?;
        result.set_negative(self.is_negative());
        result.normalize();
        Ok(result)
    }

    /// Logical left shift of the magnitude by `count` bits.
    pub fn shl(&self, count: usize) -> Result<BigNum, CryptoError> {
        if self.is_zero() || count == 0 {
            return Ok(self.clone());
        }
        let new_bits = self
            .bit_len()
            .checked_add(count)
            .ok_or(CryptoError::BnSpaceNotEnough)?;
        if new_bits.div_ceil(LIMB_BITS) > MAX_LIMBS {
            return Err(CryptoError::BnSpaceNotEnough);
        }

        let limb_shift = count / LIMB_BITS;
        let bit_shift = count % LIMB_BITS;
        let mut out = vec![0 as Limb; self.num_limbs() + limb_shift + 1];
        for (i, &limb) in self.limbs().iter().enumerate() {
            if bit_shift == 0 {
                out[i + limb_shift] = limb;
            } else {
                out[i + limb_shift] |= limb << bit_shift;
                out[i + limb_shift + 1] |= limb >> (LIMB_BITS - bit_shift);
            }
        }

        let mut result = BigNum::from_limbs(out);
        result.set_negative(self.is_negative());
        result.normalize();
        Ok(result)
    }

    /// Logical right shift of the magnitude by `count` bits.
    pub fn shr(&self, count: usize) -> BigNum {
        if count >= self.bit_len() {
            return BigNum::zero();
        }
        if count == 0 {
            return self.clone();
        }

        let limb_shift = count / LIMB_BITS;
        let bit_shift = count % LIMB_BITS;
        let limbs = self.limbs();
        let mut out = vec![0 as Limb; limbs.len() - limb_shift];
        for i in 0..out.len() {
            out[i] = limbs[i + limb_shift] >> bit_shift;
            if bit_shift > 0 && i + limb_shift + 1 < limbs.len() {
                out[i] |= limbs[i + limb_shift + 1] << (LIMB_BITS - bit_shift);
            }
        }

        let mut result = BigNum::from_limbs(out);
        result.set_negative(self.is_negative());
        result.normalize();
        result
    }
}

impl Ord for BigNum {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two unsigned limb arrays, ignoring trailing zero limbs.
pub(crate) fn cmp_magnitudes(a: &[Limb], b: &[Limb]) -> Ordering {
    let max_len = a.len().max(b.len());
    for i in (0..max_len).rev() {
        let av = if i < a.len() { a[i] } else { 0 };
        let bv = if i < b.len() { b[i] } else { 0 };
        if av != bv {
            return av.cmp(&bv);
        }
    }
    Ordering::Equal
}

/// Add two unsigned limb arrays.
fn add_magnitudes(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let max_len = a.len().max(b.len());
    let mut limbs = vec![0 as Limb; max_len + 1];
    let mut carry: Limb = 0;

    for (i, out) in limbs.iter_mut().enumerate().take(max_len) {
        let av = if i < a.len() { a[i] } else { 0 };
        let bv = if i < b.len() { b[i] } else { 0 };
        let (sum, c1) = av.overflowing_add(bv);
        let (sum, c2) = sum.overflowing_add(carry);
        *out = sum;
        carry = (c1 as Limb) + (c2 as Limb);
    }
    limbs[max_len] = carry;
    limbs
}

/// Subtract unsigned limb arrays: a - b. Requires a >= b.
fn sub_magnitudes(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    debug_assert!(cmp_magnitudes(a, b) != Ordering::Less);

    let mut limbs = vec![0 as Limb; a.len()];
    let mut borrow: Limb = 0;

    for (i, out) in limbs.iter_mut().enumerate() {
        let bv = if i < b.len() { b[i] } else { 0 };
        let (diff, b1) = a[i].overflowing_sub(bv);
        let (diff, b2) = diff.overflowing_sub(borrow);
        *out = diff;
        borrow = (b1 as Limb) + (b2 as Limb);
    }
    limbs
}

/// Schoolbook multiplication of two unsigned limb arrays.
fn mul_magnitudes(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let mut limbs = vec![0 as Limb; a.len() + b.len()];

    for i in 0..a.len() {
        let mut carry: Limb = 0;
        for j in 0..b.len() {
            let (lo, hi) = muladdc(limbs[i + j], a[i], b[j], carry);
            limbs[i + j] = lo;
            carry = hi;
        }
        limbs[i + b.len()] = carry;
    }
    limbs
}

/// Wrap a magnitude into a BigNum, enforcing the limb ceiling.
fn checked_magnitude(limbs: Vec<Limb>) -> Result<BigNum, CryptoError> {
    let bn = BigNum::from_limbs(limbs);
    if bn.num_limbs() > MAX_LIMBS {
        return Err(CryptoError::BnSpaceNotEnough);
    }
    Ok(bn)
}
