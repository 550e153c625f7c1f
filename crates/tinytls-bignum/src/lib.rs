#![forbid(unsafe_code)]
#![doc = "Multi-precision integer arithmetic library for tinyTLS."]

mod bignum;
mod ct;
mod div;
mod gcd;
mod limb;
mod montgomery;
mod ops;
mod prime;
mod radix;
mod rand;

pub use bignum::BigNum;
pub use limb::{Limb, LIMB_BITS, MAX_LIMBS};
pub use montgomery::MontgomeryCtx;
pub use rand::{RandomSource, SystemRandom};
