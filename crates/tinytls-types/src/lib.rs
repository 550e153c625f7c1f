#![forbid(unsafe_code)]
#![doc = "Common types and error codes for tinyTLS."]

pub mod error;

pub use error::*;
