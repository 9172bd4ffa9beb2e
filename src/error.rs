use thiserror::Error;

use crate::store::HeroId;

/// Errors raised while turning the drawing surface into bytes and back
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode drawing: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to decode drawing: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Drawing is {found:?} but the canvas is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
}

/// Errors reported by a hero image store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No hero with id {0}")]
    UnknownHero(HeroId),

    #[error("Hero store unavailable: {0}")]
    Unavailable(String),

    #[error("No hero ids left to assign")]
    IdsExhausted,
}

/// Errors from drawing session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Nothing to save")]
    NotDirty,

    #[error("A save is already in progress")]
    SaveInFlight,

    #[error("Not allowed while the session is {0:?}")]
    InvalidState(crate::session::SessionState),

    #[error("Refusing to load an uploaded image into the canvas")]
    NotEngineDrawn,

    #[error("Save ticket does not match the pending save")]
    StaleTicket,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type SessionResult<T> = Result<T, SessionError>;
