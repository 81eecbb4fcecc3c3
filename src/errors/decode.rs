/// Errors raised while decoding a Jupiter `route` instruction payload
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Instruction data is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("Instruction data too short ({len} bytes) to hold a discriminator")]
    Truncated { len: usize },

    #[error("Unexpected instruction discriminator {discriminator:?}, expected route")]
    UnknownInstruction { discriminator: [u8; 8] },

    #[error("Failed to decode instruction data: {data}. IDL possibly outdated ({reason})")]
    Layout { data: String, reason: String },

    #[error("Failed to encode route arguments: {0}")]
    Encoding(String),
}
