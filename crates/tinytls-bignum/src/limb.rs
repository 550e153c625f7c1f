//! Limb-level arithmetic primitives.

/// Limb type for big number representation (64-bit on 64-bit platforms).
pub type Limb = u64;
/// Double-width type for multiplication intermediates.
pub type DoubleLimb = u128;

/// Bits per limb.
pub const LIMB_BITS: usize = 64;
/// Bytes per limb.
pub const LIMB_BYTES: usize = 8;

/// Maximum number of limbs a big number may grow to.
///
/// Operations that would exceed this fail with `BnSpaceNotEnough`, keeping
/// memory use bounded on pathological inputs.
pub const MAX_LIMBS: usize = 10_000;

/// Multiply-accumulate with carry: computes `s + a * b + c` in a
/// double-width accumulator and returns `(low, high)`.
///
/// Every multi-precision multiplication, Montgomery reduction, and division
/// inner loop reduces to this primitive.
#[inline(always)]
pub fn muladdc(s: Limb, a: Limb, b: Limb, c: Limb) -> (Limb, Limb) {
    let t = s as DoubleLimb + a as DoubleLimb * b as DoubleLimb + c as DoubleLimb;
    (t as Limb, (t >> LIMB_BITS) as Limb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muladdc_small() {
        let (lo, hi) = muladdc(1, 2, 3, 4);
        assert_eq!((lo, hi), (11, 0));
    }

    #[test]
    fn test_muladdc_carry_out() {
        // MAX * MAX + MAX + MAX does not overflow the double-width type.
        let (lo, hi) = muladdc(Limb::MAX, Limb::MAX, Limb::MAX, Limb::MAX);
        let expect = Limb::MAX as DoubleLimb
            + Limb::MAX as DoubleLimb * Limb::MAX as DoubleLimb
            + Limb::MAX as DoubleLimb;
        assert_eq!(lo, expect as Limb);
        assert_eq!(hi, (expect >> LIMB_BITS) as Limb);
    }

    #[test]
    fn test_muladdc_zero_product() {
        let (lo, hi) = muladdc(7, 0, Limb::MAX, 0);
        assert_eq!((lo, hi), (7, 0));
    }
}
