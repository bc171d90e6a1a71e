//! Codec trait and implementations for opaque record payloads.
//!
//! The backend never interprets the `current_card` column of a game-state
//! row: it stores whatever bytes the client hands it. A [`Codec`] decides
//! how those bytes are produced, so the room layer can stay agnostic of the
//! card representation.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to bytes and decodes them back.
///
/// `Send + Sync + 'static` because a codec lives inside long-running store
/// handles that may be moved across Tokio worker threads.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// JSON keeps the stored card readable when inspecting the backend tables
/// by hand. Behind the `json` feature (enabled by default).
///
/// ```rust
/// use jornada_protocol::{Codec, GamePhase, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&GamePhase::Answer).unwrap();
/// assert_eq!(bytes, br#""answer""#);
/// let phase: GamePhase = codec.decode(&bytes).unwrap();
/// assert_eq!(phase, GamePhase::Answer);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
