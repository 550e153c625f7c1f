#![no_main]
use libfuzzer_sys::fuzz_target;
use tinytls_bignum::BigNum;

fuzz_target!(|data: &[u8]| {
    let Ok(x) = BigNum::from_bytes_be(data) else {
        return;
    };
    let minimal = x.to_bytes_be();
    let back = BigNum::from_bytes_be(&minimal).unwrap();
    assert_eq!(back, x);

    // Padding back out to the input length must round-trip too.
    if !data.is_empty() {
        let padded = x.to_bytes_be_padded(data.len()).unwrap();
        assert_eq!(BigNum::from_bytes_be(&padded).unwrap(), x);
    }
});
