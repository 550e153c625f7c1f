//! Constant-time operations for big numbers.
//!
//! These helpers avoid data-dependent branching. They harden individual
//! steps (the Montgomery final subtraction in particular); the crate as a
//! whole does not claim constant-time execution.

use crate::bignum::BigNum;
use crate::limb::Limb;
use subtle::{Choice, ConstantTimeEq};

impl BigNum {
    /// Constant-time equality comparison.
    pub fn ct_eq(&self, other: &BigNum) -> Choice {
        let max_len = self.num_limbs().max(other.num_limbs());
        let mut result: u8 = 1;

        result &= (self.is_negative() as u8)
            .ct_eq(&(other.is_negative() as u8))
            .unwrap_u8();

        for i in 0..max_len {
            let a = self.limbs().get(i).copied().unwrap_or(0);
            let b = other.limbs().get(i).copied().unwrap_or(0);
            result &= a.ct_eq(&b).unwrap_u8();
        }

        Choice::from(result)
    }

    /// Constant-time conditional select: returns `a` if choice == 0,
    /// `b` if choice == 1.
    pub fn ct_select(a: &BigNum, b: &BigNum, choice: Choice) -> BigNum {
        let mask = (choice.unwrap_u8() as Limb).wrapping_neg();
        let max_len = a.num_limbs().max(b.num_limbs());
        let mut limbs = vec![0 as Limb; max_len];

        for (i, limb) in limbs.iter_mut().enumerate() {
            let av = a.limbs().get(i).copied().unwrap_or(0);
            let bv = b.limbs().get(i).copied().unwrap_or(0);
            *limb = av ^ (mask & (av ^ bv));
        }

        let neg_a = a.is_negative() as Limb;
        let neg_b = b.is_negative() as Limb;
        let neg = neg_a ^ (mask & (neg_a ^ neg_b));

        let mut result = BigNum::from_limbs(limbs);
        result.set_negative(neg != 0);
        result.normalize();
        result
    }

    /// Conditional subtraction on magnitudes: if self >= modulus, return
    /// self - modulus, otherwise return self unchanged. The comparison and
    /// selection are branch-free.
    pub fn ct_sub_if_gte(&self, modulus: &BigNum) -> BigNum {
        let max_len = self.num_limbs().max(modulus.num_limbs());

        let mut diff = vec![0 as Limb; max_len];
        let mut borrow: Limb = 0;
        for (i, d) in diff.iter_mut().enumerate() {
            let a = self.limbs().get(i).copied().unwrap_or(0);
            let b = modulus.limbs().get(i).copied().unwrap_or(0);
            let (d1, b1) = a.overflowing_sub(b);
            let (d2, b2) = d1.overflowing_sub(borrow);
            *d = d2;
            borrow = (b1 as Limb) + (b2 as Limb);
        }

        // borrow == 0 means self >= modulus: take the difference.
        let use_diff = Choice::from((borrow == 0) as u8);
        let diff_bn = BigNum::from_limbs(diff);
        BigNum::ct_select(self, &diff_bn, use_diff)
    }
}

impl ConstantTimeEq for BigNum {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.ct_eq(other)
    }
}
