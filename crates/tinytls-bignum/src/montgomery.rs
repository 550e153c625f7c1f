//! Montgomery multiplication and sliding-window modular exponentiation.

use crate::bignum::BigNum;
use crate::limb::{muladdc, Limb, LIMB_BITS};
use tinytls_types::CryptoError;
use zeroize::Zeroize;

/// Montgomery multiplication context.
///
/// Precomputes the values needed for modular multiplication in Montgomery
/// form: the low-limb inverse `n_prime` and `R^2 mod n`. Reusing one
/// context across several [`BigNum::mod_exp_with_ctx`] calls with the same
/// modulus amortizes the `R^2` computation.
pub struct MontgomeryCtx {
    /// The modulus N (odd, positive).
    modulus: BigNum,
    /// N' such that N * N' == -1 (mod 2^LIMB_BITS).
    n_prime: Limb,
    /// R^2 mod N where R = 2^(limbs(N) * LIMB_BITS).
    rr: BigNum,
}

impl MontgomeryCtx {
    /// Create a new Montgomery context.
    ///
    /// Fails with `InvalidArg` unless the modulus is positive and odd.
    pub fn new(modulus: &BigNum) -> Result<Self, CryptoError> {
        if modulus.is_zero() || modulus.is_negative() || modulus.is_even() {
            return Err(CryptoError::InvalidArg);
        }

        let mut m = modulus.clone();
        m.normalize();
        let n_prime = compute_n_prime(m.limbs()[0]);
        let rr = BigNum::from_u64(1)
            .shl(2 * m.num_limbs() * LIMB_BITS)?
            .mod_reduce(&m)?;

        Ok(MontgomeryCtx {
            modulus: m,
            n_prime,
            rr,
        })
    }

    /// The modulus this context reduces by.
    pub fn modulus(&self) -> &BigNum {
        &self.modulus
    }
}

/// Compute N' such that N * N' == -1 (mod 2^LIMB_BITS).
///
/// Newton iteration over the limb ring: each step doubles the number of
/// correct low bits of the inverse.
fn compute_n_prime(n0: Limb) -> Limb {
    let mut x: Limb = 1;
    for _ in 0..63 {
        x = x.wrapping_mul(2u64.wrapping_sub(n0.wrapping_mul(x)));
    }
    x.wrapping_neg()
}

/// Montgomery product: a * b * R^-1 mod n, for a, b in [0, n).
///
/// Interleaved (CIOS) form: each step folds one limb of `a` into the
/// accumulator and cancels the low limb with a multiple of the modulus.
fn mont_mul(a: &BigNum, b: &BigNum, ctx: &MontgomeryCtx) -> BigNum {
    let n_limbs = ctx.modulus.limbs();
    let n = n_limbs.len();
    let b0 = b.limbs().first().copied().unwrap_or(0);

    let mut t = vec![0 as Limb; 2 * n + 1];
    for i in 0..n {
        let ai = a.limbs().get(i).copied().unwrap_or(0);
        let u = t[i]
            .wrapping_add(ai.wrapping_mul(b0))
            .wrapping_mul(ctx.n_prime);
        mul_add_into(&mut t[i..], b.limbs(), ai);
        mul_add_into(&mut t[i..], n_limbs, u);
    }

    // The low n limbs are now zero; the rest is a value below 2N.
    let reduced = BigNum::from_limbs(t[n..].to_vec());
    t.zeroize();
    reduced.ct_sub_if_gte(&ctx.modulus)
}

/// acc += x * m, rippling the final carry into the higher limbs.
fn mul_add_into(acc: &mut [Limb], x: &[Limb], m: Limb) {
    let mut carry: Limb = 0;
    for (i, &xi) in x.iter().enumerate() {
        let (lo, hi) = muladdc(acc[i], m, xi, carry);
        acc[i] = lo;
        carry = hi;
    }
    let mut i = x.len();
    while carry != 0 && i < acc.len() {
        let (s, c) = acc[i].overflowing_add(carry);
        acc[i] = s;
        carry = c as Limb;
        i += 1;
    }
}

impl BigNum {
    /// Modular exponentiation: self^exponent mod modulus.
    ///
    /// The modulus must be positive and odd; the exponent must be
    /// non-negative. A negative or oversized base is first reduced into
    /// `[0, modulus)`.
    pub fn mod_exp(&self, exponent: &BigNum, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        let ctx = MontgomeryCtx::new(modulus)?;
        self.mod_exp_with_ctx(exponent, &ctx)
    }

    /// Modular exponentiation reusing a precomputed [`MontgomeryCtx`].
    pub fn mod_exp_with_ctx(
        &self,
        exponent: &BigNum,
        ctx: &MontgomeryCtx,
    ) -> Result<BigNum, CryptoError> {
        if exponent.is_negative() {
            return Err(CryptoError::InvalidArg);
        }
        let modulus = ctx.modulus();
        let base = self.mod_reduce(modulus)?;

        let ebits = exponent.bit_len();
        if ebits == 0 {
            return BigNum::from_u64(1).mod_reduce(modulus);
        }

        let wsize = window_size(ebits);

        // Window table of Montgomery-form powers: W[1] and W[2^(w-1)..2^w).
        let table_len = 1usize << wsize;
        let mut table: Vec<BigNum> = vec![BigNum::zero(); table_len];
        table[1] = mont_mul(&base, &ctx.rr, ctx);
        if wsize > 1 {
            let mut acc = table[1].clone();
            for _ in 0..wsize - 1 {
                acc = mont_mul(&acc, &acc, ctx);
            }
            table[table_len / 2] = acc;
            for i in table_len / 2 + 1..table_len {
                table[i] = mont_mul(&table[i - 1], &table[1], ctx);
            }
        }

        // X = R mod N, the Montgomery form of 1.
        let mut x = mont_mul(&BigNum::from_u64(1), &ctx.rr, ctx);

        // Scan the exponent from the most significant bit, collecting
        // windows that start at a set bit.
        let mut state = 0u8;
        let mut nbits = 0usize;
        let mut wbits = 0usize;
        for i in (0..ebits).rev() {
            let ei = exponent.bit(i);
            if !ei && state == 0 {
                continue;
            }
            if !ei && state == 1 {
                x = mont_mul(&x, &x, ctx);
                continue;
            }
            state = 2;
            nbits += 1;
            wbits |= (ei as usize) << (wsize - nbits);
            if nbits == wsize {
                for _ in 0..wsize {
                    x = mont_mul(&x, &x, ctx);
                }
                x = mont_mul(&x, &table[wbits], ctx);
                state = 1;
                nbits = 0;
                wbits = 0;
            }
        }

        // Flush the partial final window one bit at a time.
        for _ in 0..nbits {
            x = mont_mul(&x, &x, ctx);
            wbits <<= 1;
            if wbits & (1 << wsize) != 0 {
                x = mont_mul(&x, &table[1], ctx);
            }
        }

        // Multiply by 1 to leave Montgomery form.
        Ok(mont_mul(&x, &BigNum::from_u64(1), ctx))
    }
}

/// Window width for the given exponent bit length.
fn window_size(ebits: usize) -> usize {
    if ebits > 670 {
        6
    } else if ebits > 275 {
        5
    } else if ebits > 115 {
        4
    } else if ebits > 49 {
        3
    } else if ebits > 17 {
        2
    } else {
        1
    }
}
