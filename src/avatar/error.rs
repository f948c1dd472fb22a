//! Error types for avatar construction

use thiserror::Error;

use crate::dna::DnaError;
use crate::registry::LookupError;

/// Error when building an avatar from a DNA or from named choices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AvatarError {
    /// A DNA byte pair names no catalog entry
    #[error("Undefined trait for layer '{layer}': pattern #{pattern}, palette #{palette}")]
    UndefinedTrait { layer: String, pattern: u8, palette: u8 },
    /// Encoding then decoding an avatar did not reproduce it
    #[error("Avatar DNA mismatch: {dna} decodes to {decoded} instead of {expected}")]
    RoundTripMismatch { dna: String, expected: String, decoded: String },
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Dna(#[from] DnaError),
}
