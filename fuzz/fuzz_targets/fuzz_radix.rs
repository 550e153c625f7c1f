#![no_main]
use libfuzzer_sys::fuzz_target;
use tinytls_bignum::BigNum;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let s = if s.len() > 4096 { &s[..4096] } else { s };
    for radix in 2..=16 {
        if let Ok(x) = BigNum::from_str_radix(s, radix) {
            let out = x.to_str_radix(radix).unwrap();
            let back = BigNum::from_str_radix(&out, radix).unwrap();
            assert_eq!(back, x);
        }
    }
});
