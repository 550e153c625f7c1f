#![no_main]
use libfuzzer_sys::fuzz_target;
use tinytls_bignum::BigNum;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 512 {
        return;
    }
    let split = (data[0] as usize % (data.len() - 1)) + 1;
    let a = BigNum::from_bytes_be(&data[1..split.max(1)]).unwrap_or_else(|_| BigNum::zero());
    let b = BigNum::from_bytes_be(&data[split..]).unwrap_or_else(|_| BigNum::zero());

    match a.div_rem(&b) {
        Ok((q, r)) => {
            // a = q * b + r with |r| < |b|
            let back = q.mul(&b).unwrap().add(&r).unwrap();
            assert_eq!(back, a);
            assert_eq!(r.cmp_abs(&b), std::cmp::Ordering::Less);
        }
        Err(_) => assert!(b.is_zero()),
    }
});
