//! Long division and modular reduction.
//!
//! The multi-limb path is Knuth's Algorithm D: normalize the divisor so its
//! top limb has the high bit set, estimate each quotient limb from the top
//! two dividend limbs, refine the estimate against the second divisor limb,
//! and correct with an add-back when the multiply-subtract underflows.

use crate::bignum::BigNum;
use crate::limb::{muladdc, DoubleLimb, Limb, LIMB_BITS};
use std::cmp::Ordering;
use tinytls_types::CryptoError;
use zeroize::Zeroize;

impl BigNum {
    /// Division with remainder: self = q * divisor + r.
    ///
    /// The remainder carries the sign of the dividend and satisfies
    /// `0 <= |r| < |divisor|`.
    pub fn div_rem(&self, divisor: &BigNum) -> Result<(BigNum, BigNum), CryptoError> {
        if divisor.is_zero() {
            return Err(CryptoError::BnDivisionByZero);
        }

        let (mut q, mut r) = div_rem_magnitudes(self.limbs(), divisor.limbs());
        q.set_negative(self.is_negative() != divisor.is_negative());
        q.normalize();
        r.set_negative(self.is_negative());
        r.normalize();
        Ok((q, r))
    }

    /// Division with remainder by a single limb.
    ///
    /// The quotient carries the sign of the dividend; the remainder is the
    /// remainder of the magnitude.
    pub fn div_rem_u64(&self, divisor: u64) -> Result<(BigNum, u64), CryptoError> {
        if divisor == 0 {
            return Err(CryptoError::BnDivisionByZero);
        }

        let (q_limbs, r) = div_rem_by_limb(self.limbs(), divisor);
        let mut q = BigNum::from_limbs(q_limbs);
        q.set_negative(self.is_negative());
        q.normalize();
        Ok((q, r))
    }

    /// Canonical modular reduction: self mod modulus, in `[0, modulus)`.
    ///
    /// Fails with `BnNegativeValue` for a negative modulus.
    pub fn mod_reduce(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        if modulus.is_zero() {
            return Err(CryptoError::BnDivisionByZero);
        }
        if modulus.is_negative() {
            return Err(CryptoError::BnNegativeValue);
        }

        let (_, r) = self.div_rem(modulus)?;
        if r.is_negative() {
            return r.add(modulus);
        }
        Ok(r)
    }

    /// Canonical single-limb remainder: self mod modulus, in `[0, modulus)`.
    ///
    /// Walks the limbs from the most significant, folding each into the
    /// running remainder through the double-width type.
    pub fn mod_u64(&self, modulus: u64) -> Result<u64, CryptoError> {
        if modulus == 0 {
            return Err(CryptoError::BnDivisionByZero);
        }
        if modulus == 1 {
            return Ok(0);
        }

        let mut r: Limb = 0;
        for &limb in self.limbs().iter().rev() {
            let cur = ((r as DoubleLimb) << LIMB_BITS) | limb as DoubleLimb;
            r = (cur % modulus as DoubleLimb) as Limb;
        }
        if self.is_negative() && r != 0 {
            r = modulus - r;
        }
        Ok(r)
    }
}

/// Magnitude division: returns (|a| / |b|, |a| mod |b|). Requires b != 0.
fn div_rem_magnitudes(a: &[Limb], b: &[Limb]) -> (BigNum, BigNum) {
    let a_len = trimmed_len(a);
    let b_len = trimmed_len(b);
    let a = &a[..a_len.max(1)];
    let b = &b[..b_len.max(1)];

    if crate::ops::cmp_magnitudes(a, b) == Ordering::Less {
        return (BigNum::zero(), BigNum::from_limbs(a.to_vec()));
    }
    if b.len() == 1 {
        let (q, r) = div_rem_by_limb(a, b[0]);
        return (BigNum::from_limbs(q), BigNum::from_u64(r));
    }

    // Normalize so the divisor's top limb has its high bit set.
    let shift = b[b.len() - 1].leading_zeros() as usize;
    let mut bn = shl_limbs(b, shift, 0);
    let mut an = shl_limbs(a, shift, 1);

    let n = bn.len();
    let m = an.len() - 1 - n;
    let mut q = vec![0 as Limb; m + 1];
    let d1 = bn[n - 1] as DoubleLimb;
    let base: DoubleLimb = 1 << LIMB_BITS;

    for j in (0..=m).rev() {
        // Estimate the quotient limb from the top two dividend limbs,
        // then refine against the second divisor limb.
        let num = ((an[j + n] as DoubleLimb) << LIMB_BITS) | an[j + n - 1] as DoubleLimb;
        let mut qhat = num / d1;
        let mut rhat = num - qhat * d1;
        loop {
            if qhat >= base
                || qhat * (bn[n - 2] as DoubleLimb)
                    > ((rhat << LIMB_BITS) | an[j + n - 2] as DoubleLimb)
            {
                qhat -= 1;
                rhat += d1;
                if rhat < base {
                    continue;
                }
            }
            break;
        }

        // Multiply-subtract qhat * divisor from the dividend window.
        let qh = qhat as Limb;
        let mut mul_carry: Limb = 0;
        let mut borrow: Limb = 0;
        for i in 0..n {
            let (lo, hi) = muladdc(0, qh, bn[i], mul_carry);
            mul_carry = hi;
            let (d, b1) = an[j + i].overflowing_sub(lo);
            let (d, b2) = d.overflowing_sub(borrow);
            an[j + i] = d;
            borrow = (b1 as Limb) + (b2 as Limb);
        }
        let (d, b1) = an[j + n].overflowing_sub(mul_carry);
        let (d, b2) = d.overflowing_sub(borrow);
        an[j + n] = d;

        if b1 || b2 {
            // Estimate was one too large: add the divisor back.
            q[j] = qh - 1;
            let mut carry: Limb = 0;
            for i in 0..n {
                let (s, c1) = an[j + i].overflowing_add(bn[i]);
                let (s, c2) = s.overflowing_add(carry);
                an[j + i] = s;
                carry = (c1 as Limb) + (c2 as Limb);
            }
            an[j + n] = an[j + n].wrapping_add(carry);
        } else {
            q[j] = qh;
        }
    }

    let remainder = BigNum::from_limbs(an[..n].to_vec()).shr(shift);
    an.zeroize();
    bn.zeroize();
    (BigNum::from_limbs(q), remainder)
}

/// Magnitude division by a single limb.
fn div_rem_by_limb(a: &[Limb], divisor: Limb) -> (Vec<Limb>, Limb) {
    let mut q = vec![0 as Limb; a.len()];
    let mut r: DoubleLimb = 0;
    for i in (0..a.len()).rev() {
        let cur = (r << LIMB_BITS) | a[i] as DoubleLimb;
        q[i] = (cur / divisor as DoubleLimb) as Limb;
        r = cur % divisor as DoubleLimb;
    }
    (q, r as Limb)
}

/// Left-shift a limb slice by fewer than `LIMB_BITS` bits, with `extra`
/// additional high limbs of headroom.
fn shl_limbs(src: &[Limb], shift: usize, extra: usize) -> Vec<Limb> {
    let mut out = vec![0 as Limb; src.len() + extra + (shift > 0) as usize];
    for (i, &limb) in src.iter().enumerate() {
        if shift == 0 {
            out[i] = limb;
        } else {
            out[i] |= limb << shift;
            out[i + 1] |= limb >> (LIMB_BITS - shift);
        }
    }
    out.truncate(src.len() + extra);
    out
}

fn trimmed_len(limbs: &[Limb]) -> usize {
    let mut len = limbs.len();
    while len > 0 && limbs[len - 1] == 0 {
        len -= 1;
    }
    len
}
