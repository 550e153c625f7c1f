//! Integration tests for tinyTLS big numbers.
//! Cross-module scenarios and the reference self-test vectors.

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use tinytls_bignum::{BigNum, MontgomeryCtx, RandomSource, SystemRandom};
    use tinytls_types::CryptoError;

    // Operands of the canonical 512-bit self-test carried by the reference
    // implementation.
    const TEST_A: &str = "EFE021C2645FD1DC586E69184AF4A31ED5F53E93B5F123FA41680867BA110131\
                          944FE7952E2517337780CB0DB80E61AAE7C8DDC6C5C6AADEB34EB38A2F40D5E6";
    const TEST_E: &str = "B2E7EFD37075B9F03FF989C7C5051C2034D2A323810251127E7BF8625A4F49A5\
                          F3E27F4DA8BD59C47D6DAABA4C8127BD5B5C25763222FEFCCFC38B832366C29E";
    const TEST_N: &str = "0066A198186C18C10B2F5ED9B522752A9830B69916E535C8F047518A889A43A5\
                          94B6BED27A168D31D4A52F88925AA8F5";
    const TEST_X: &str = "36E139AEA55215609D2816998ED020BBBD96C37890F65171D948E9BC7CBAA4D9\
                          325D24D6A3C12710F10A09FA08AB87";

    fn hex(s: &str) -> BigNum {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        BigNum::from_str_radix(&compact, 16).unwrap()
    }

    // -------------------------------------------------------
    // 1. Reference self-test vectors
    // -------------------------------------------------------
    #[test]
    fn test_reference_exp_mod() {
        let a = hex(TEST_A);
        let e = hex(TEST_E);
        let n = hex(TEST_N);
        let expect = hex(TEST_X);

        let x = a.mod_exp(&e, &n).unwrap();
        assert_eq!(x, expect);
        assert_eq!(x.to_str_radix(16).unwrap(), TEST_X);
    }

    #[test]
    fn test_reference_exp_mod_cached_rr() {
        let a = hex(TEST_A);
        let e = hex(TEST_E);
        let n = hex(TEST_N);
        let ctx = MontgomeryCtx::new(&n).unwrap();

        let first = a.mod_exp_with_ctx(&e, &ctx).unwrap();
        let second = a.mod_exp_with_ctx(&e, &ctx).unwrap();
        assert_eq!(first, hex(TEST_X));
        assert_eq!(first, second);
    }

    #[test]
    fn test_reference_mul_div_identity() {
        let a = hex(TEST_A);
        let n = hex(TEST_N);

        let product = a.mul(&n).unwrap();
        let (q, r) = product.div_rem(&n).unwrap();
        assert_eq!(q, a);
        assert!(r.is_zero());

        let (q, r) = a.div_rem(&n).unwrap();
        assert_eq!(r.cmp_abs(&n), Ordering::Less);
        assert_eq!(q.mul(&n).unwrap().add(&r).unwrap(), a);
    }

    #[test]
    fn test_reference_inv_mod() {
        let a = hex(TEST_A);
        let n = hex(TEST_N);

        let inv = a.mod_inv(&n).unwrap();
        assert_eq!(inv.cmp_abs(&n), Ordering::Less);
        let product = a.mul(&inv).unwrap().mod_reduce(&n).unwrap();
        assert!(product.is_one());
    }

    // -------------------------------------------------------
    // 2. Small literal scenarios
    // -------------------------------------------------------
    #[test]
    fn test_inv_mod_3_11() {
        let inv = BigNum::from_u64(3).mod_inv(&BigNum::from_u64(11)).unwrap();
        assert_eq!(inv, BigNum::from_u64(4));
    }

    #[test]
    fn test_gcd_literals() {
        let g = BigNum::from_u64(693).gcd(&BigNum::from_u64(609)).unwrap();
        assert_eq!(g, BigNum::from_u64(21));
        let g = BigNum::from_u64(1764).gcd(&BigNum::from_u64(868)).unwrap();
        assert_eq!(g, BigNum::from_u64(28));
    }

    #[test]
    fn test_div_literal() {
        let (q, r) = BigNum::from_u64(1_000_003)
            .div_rem(&BigNum::from_u64(1000))
            .unwrap();
        assert_eq!(q, BigNum::from_u64(1000));
        assert_eq!(r, BigNum::from_u64(3));
    }

    #[test]
    fn test_mod_negative_literal() {
        let r = BigNum::from_i64(-7)
            .mod_reduce(&BigNum::from_u64(3))
            .unwrap();
        assert_eq!(r, BigNum::from_u64(2));
    }

    #[test]
    fn test_export_probe_reports_needed_size() {
        // A 300-bit value needs 38 bytes.
        let x = BigNum::from_u64(1).shl(299).unwrap();
        assert_eq!(x.byte_len(), 38);
        match x.to_bytes_be_padded(0) {
            Err(CryptoError::BufferTooSmall { need, got }) => {
                assert_eq!(need, 38);
                assert_eq!(got, 0);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
        let out = x.to_bytes_be_padded(38).unwrap();
        assert_eq!(BigNum::from_bytes_be(&out).unwrap(), x);
    }

    // -------------------------------------------------------
    // 3. Cross-operation properties
    // -------------------------------------------------------
    #[test]
    fn test_radix_roundtrip_reference_operand() {
        let a = hex(TEST_A);
        for radix in 2..=16 {
            let s = a.to_str_radix(radix).unwrap();
            assert_eq!(BigNum::from_str_radix(&s, radix).unwrap(), a);
        }
    }

    #[test]
    fn test_binary_roundtrip_reference_operand() {
        let a = hex(TEST_A);
        let bytes = a.to_bytes_be();
        assert_eq!(bytes.len(), a.byte_len());
        assert_eq!(BigNum::from_bytes_be(&bytes).unwrap(), a);
    }

    #[test]
    fn test_shift_roundtrip() {
        let a = hex(TEST_N);
        for k in [1, 13, 64, 100, 192] {
            let shifted = a.shl(k).unwrap();
            assert_eq!(shifted.bit_len(), a.bit_len() + k);
            assert_eq!(shifted.shr(k), a);
        }
    }

    #[test]
    fn test_add_mul_algebra() {
        let a = hex(TEST_A);
        let e = hex(TEST_E);
        let n = hex(TEST_N);

        assert_eq!(a.add(&e).unwrap(), e.add(&a).unwrap());
        assert_eq!(a.mul(&e).unwrap(), e.mul(&a).unwrap());
        // (a + e) * n = a*n + e*n
        let lhs = a.add(&e).unwrap().mul(&n).unwrap();
        let rhs = a.mul(&n).unwrap().add(&e.mul(&n).unwrap()).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_fermat_on_exp_mod() {
        // p = 2^127 - 1 is prime.
        let p = BigNum::from_u64(1).shl(127).unwrap().sub_i64(1).unwrap();
        let e = p.sub_i64(1).unwrap();
        let a = hex(TEST_A).mod_reduce(&p).unwrap();
        assert!(a.mod_exp(&e, &p).unwrap().is_one());
    }

    #[test]
    fn test_inverse_of_random_below() {
        let n = hex(TEST_N);
        let mut rng = SystemRandom;
        for _ in 0..4 {
            let a = BigNum::random_below(&n, &mut rng).unwrap();
            if !a.gcd(&n).unwrap().is_one() {
                continue;
            }
            let inv = a.mod_inv(&n).unwrap();
            assert!(a.mul(&inv).unwrap().mod_reduce(&n).unwrap().is_one());
        }
    }

    // -------------------------------------------------------
    // 4. Prime generation
    // -------------------------------------------------------
    #[test]
    fn test_generate_safe_prime_128() {
        let mut rng = SystemRandom;
        let p = BigNum::generate_prime(128, true, &mut rng).unwrap();
        assert!(p.bit_len() >= 128);
        assert!(p.is_probably_prime(40, &mut rng).unwrap());
        assert!(p.shr(1).is_probably_prime(40, &mut rng).unwrap());
    }

    #[test]
    fn test_generated_prime_fermat() {
        let mut rng = SystemRandom;
        let p = BigNum::generate_prime(96, false, &mut rng).unwrap();
        let e = p.sub_i64(1).unwrap();
        assert!(BigNum::from_u64(2).mod_exp(&e, &p).unwrap().is_one());
    }

    // -------------------------------------------------------
    // 5. RNG capability plumbing
    // -------------------------------------------------------
    struct FixedRng(Vec<u8>);

    impl RandomSource for FixedRng {
        fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), CryptoError> {
            for b in buf.iter_mut() {
                *b = self.0.pop().ok_or(CryptoError::BnRandGenFail)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_fill_random_uses_caller_source() {
        let mut rng = FixedRng(vec![0x04, 0x03, 0x02, 0x01]);
        let x = BigNum::fill_random(4, &mut rng).unwrap();
        assert_eq!(x, BigNum::from_u64(0x01020304));

        // Exhausted source propagates the error instead of panicking.
        assert!(matches!(
            BigNum::fill_random(1, &mut rng),
            Err(CryptoError::BnRandGenFail)
        ));
    }
}
