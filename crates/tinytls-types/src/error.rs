/// Cryptographic operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("invalid argument")]
    InvalidArg,

    // Buffer errors
    #[error("buffer length not enough: need {need}, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    // BigNum errors
    #[error("big number: insufficient space")]
    BnSpaceNotEnough,
    #[error("big number: invalid character in string")]
    BnInvalidCharacter,
    #[error("big number: division by zero")]
    BnDivisionByZero,
    #[error("big number: negative value")]
    BnNegativeValue,
    #[error("big number: no modular inverse")]
    BnNoInverse,
    #[error("big number: random generation failed")]
    BnRandGenFail,
}
