// src/common/error.rs

/// Errors surfaced by either end of the link.
///
/// The device side only ever produces [`LinkError::Io`]; the remaining
/// variants belong to the host session.
#[derive(Debug, thiserror::Error)]
pub enum LinkError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the serial implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// The device announced that neither sensor is online.
    #[error("No sensor online")]
    NoSensors,

    /// Buffer provided was too small.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },
}

// Allow mapping from the underlying serial error
impl<E: core::fmt::Debug> From<E> for LinkError<E> {
    fn from(e: E) -> Self {
        LinkError::Io(e)
    }
}
