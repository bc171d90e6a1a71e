//! Error types for the protocol layer.

/// Errors that can occur while encoding payloads or validating wire values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization of an opaque payload failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The stored bytes could not be turned back into the expected type.
    ///
    /// Usually a `current_card` column written by an incompatible client.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A room code that is not six ASCII letters or digits.
    #[error("invalid room code: {0:?}")]
    InvalidRoomCode(String),
}
