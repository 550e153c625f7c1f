//! GCD and modular inverse operations.

use crate::bignum::BigNum;
use std::cmp::Ordering;
use tinytls_types::CryptoError;

impl BigNum {
    /// Greatest common divisor of |self| and |other|, by the binary
    /// algorithm: pull out the shared power of two, then halve and
    /// subtract until one side reaches zero.
    ///
    /// `gcd(a, 0) = |a|` and `gcd(0, 0) = 0`.
    pub fn gcd(&self, other: &BigNum) -> Result<BigNum, CryptoError> {
        let mut a = self.abs();
        let mut b = other.abs();
        if a.is_zero() {
            return Ok(b);
        }
        if b.is_zero() {
            return Ok(a);
        }

        let k = a.trailing_zeros().min(b.trailing_zeros());
        a = a.shr(a.trailing_zeros());
        b = b.shr(b.trailing_zeros());

        while !a.is_zero() {
            if a.cmp_abs(&b) == Ordering::Less {
                std::mem::swap(&mut a, &mut b);
            }
            a = a.sub_abs(&b)?;
            a = a.shr(a.trailing_zeros());
        }

        b.shl(k)
    }

    /// Modular inverse: self^(-1) mod modulus, in `[0, modulus)`.
    ///
    /// Extended binary GCD over the triples `(TU, U1, U2)` and
    /// `(TV, V1, V2)` with `U1*a + U2*n = TU` maintained throughout.
    /// Fails with `BnNoInverse` when gcd(self, modulus) != 1 and
    /// `InvalidArg` when modulus <= 1.
    pub fn mod_inv(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        if modulus.cmp_i64(1) != Ordering::Greater {
            return Err(CryptoError::InvalidArg);
        }
        if !self.gcd(modulus)?.is_one() {
            return Err(CryptoError::BnNoInverse);
        }

        let ta = self.mod_reduce(modulus)?;
        let tb = modulus.clone();
        let mut tu = ta.clone();
        let mut tv = modulus.clone();
        let mut u1 = BigNum::from_u64(1);
        let mut u2 = BigNum::zero();
        let mut v1 = BigNum::zero();
        let mut v2 = BigNum::from_u64(1);

        loop {
            while tu.is_even() {
                tu = tu.shr(1);
                if u1.is_odd() || u2.is_odd() {
                    u1 = u1.add(&tb)?;
                    u2 = u2.sub(&ta)?;
                }
                u1 = u1.shr(1);
                u2 = u2.shr(1);
            }

            while tv.is_even() {
                tv = tv.shr(1);
                if v1.is_odd() || v2.is_odd() {
                    v1 = v1.add(&tb)?;
                    v2 = v2.sub(&ta)?;
                }
                v1 = v1.shr(1);
                v2 = v2.shr(1);
            }

            if tu.cmp(&tv) != Ordering::Less {
                tu = tu.sub(&tv)?;
                u1 = u1.sub(&v1)?;
                u2 = u2.sub(&v2)?;
            } else {
                tv = tv.sub(&tu)?;
                v1 = v1.sub(&u1)?;
                v2 = v2.sub(&u2)?;
            }

            if tu.is_zero() {
                break;
            }
        }

        let mut x = v1;
        while x.is_negative() {
            x = x.add(modulus)?;
        }
        while x.cmp(modulus) != Ordering::Less {
            x = x.sub(modulus)?;
        }
        Ok(x)
    }
}
