use thiserror::Error;

/// Failure to decode a received frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A read ran past the end of the populated data
    #[error("EOF: needed {needed} more bytes, {remaining} remaining")]
    Eof { needed: usize, remaining: usize },

    #[error("Unknown opcode {0}")]
    UnknownOpcode(i32),

    /// Negative length prefix on a byte string
    #[error("Invalid length prefix {0}")]
    InvalidLength(i32),

    #[error("String field is not valid UTF-8")]
    InvalidUtf8,
}
