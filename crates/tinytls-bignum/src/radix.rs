//! ASCII string conversion in radix 2 through 16.

use crate::bignum::BigNum;
use crate::limb::{Limb, LIMB_BITS, MAX_LIMBS};
use tinytls_types::CryptoError;

impl BigNum {
    /// Parse from an ASCII string in the given radix (2..=16).
    ///
    /// A leading `-` marks a negative value. Radix 16 parses nibble-wise
    /// directly into limb positions; other radixes accumulate digit by
    /// digit. Fails with `BnInvalidCharacter` on any stray character.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<BigNum, CryptoError> {
        if !(2..=16).contains(&radix) {
            return Err(CryptoError::InvalidArg);
        }

        let bytes = s.as_bytes();
        let (negative, digits) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            _ => (false, bytes),
        };

        let mut x = if radix == 16 {
            let num_limbs = (digits.len() * 4).div_ceil(LIMB_BITS).max(1);
            if num_limbs > MAX_LIMBS {
                return Err(CryptoError::BnSpaceNotEnough);
            }
            let mut limbs = vec![0 as Limb; num_limbs];
            for (i, &c) in digits.iter().rev().enumerate() {
                let d = digit_value(c, 16)?;
                limbs[i / (LIMB_BITS / 4)] |= (d as Limb) << ((i % (LIMB_BITS / 4)) * 4);
            }
            BigNum::from_limbs(limbs)
        } else {
            let mut x = BigNum::zero();
            for &c in digits {
                let d = digit_value(c, radix)?;
                x = x.mul_u64(radix as u64)?.add(&BigNum::from_u64(d as u64))?;
            }
            x
        };

        if negative {
            x.set_negative(true);
            x.normalize();
        }
        Ok(x)
    }

    /// Format as an ASCII string in the given radix (2..=16).
    ///
    /// Digits above 9 are uppercase; negative values get a leading `-`;
    /// zero formats as `"0"`.
    pub fn to_str_radix(&self, radix: u32) -> Result<String, CryptoError> {
        if !(2..=16).contains(&radix) {
            return Err(CryptoError::InvalidArg);
        }
        if self.is_zero() {
            return Ok("0".to_string());
        }

        let mut digits = Vec::new();
        if radix == 16 {
            let nibbles = self.bit_len().div_ceil(4);
            for i in (0..nibbles).rev() {
                let limb = self.limbs()[i / (LIMB_BITS / 4)];
                let d = (limb >> ((i % (LIMB_BITS / 4)) * 4)) & 0xF;
                digits.push(digit_char(d as u32));
            }
        } else {
            let mut cur = self.abs();
            while !cur.is_zero() {
                let (q, r) = cur.div_rem_u64(radix as u64)?;
                digits.push(digit_char(r as u32));
                cur = q;
            }
            digits.reverse();
        }

        let mut s = String::with_capacity(digits.len() + 1);
        if self.is_negative() {
            s.push('-');
        }
        s.extend(digits);
        Ok(s)
    }
}

fn digit_value(c: u8, radix: u32) -> Result<u32, CryptoError> {
    let d = match c {
        b'0'..=b'9' => (c - b'0') as u32,
        b'a'..=b'f' => (c - b'a') as u32 + 10,
        b'A'..=b'F' => (c - b'A') as u32 + 10,
        _ => return Err(CryptoError::BnInvalidCharacter),
    };
    if d >= radix {
        return Err(CryptoError::BnInvalidCharacter);
    }
    Ok(d)
}

fn digit_char(d: u32) -> char {
    char::from_digit(d, 16).unwrap().to_ascii_uppercase()
}
