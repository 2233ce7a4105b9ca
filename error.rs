//! error - Failure modes for building the particle field

use thiserror::Error;

use crate::config::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The render target has no drawable area.
    #[error("render surface is missing or has no drawable area")]
    MissingSurface,

    #[error("mode `{mode}` requests {requested} particles but the batch holds at most {capacity}")]
    CapacityExceeded {
        mode: Mode,
        requested: usize,
        capacity: usize,
    },

    #[error("mode `{mode}` uses an empty color palette")]
    EmptyPalette { mode: Mode },

    /// Speed or connection distance is not a finite, usable number.
    #[error("mode `{mode}` has a non-finite speed or a negative connection distance")]
    InvalidConfiguration { mode: Mode },

    #[error("unrecognized mode name")]
    UnknownMode,
}

pub type Result<T> = core::result::Result<T, Error>;
