//! Error types reported by connection handles.
//!
//! Nothing in the dispatch path can fail: registration is checked by the type
//! system and `fire` never reports anything back. The only error type is
//! [`ConnectionError`], a diagnostic returned by
//! [`Connection::try_release`](crate::Connection::try_release) to explain why a
//! release detached nothing.
//!
//! Like the rest of the crate it provides `as_label` / `as_message` helpers for
//! logs and metrics.

use thiserror::Error;

/// # Reasons a release did not detach a handler.
///
/// Returned by [`Connection::try_release`](crate::Connection::try_release).
/// In every case the handle is left empty afterwards, exactly as with
/// [`Connection::release`](crate::Connection::release).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionError {
    /// The handle did not reference any handler (default-constructed, moved
    /// out of, or already released).
    #[error("connection is empty")]
    Empty,

    /// The signal owning the handler was dropped; its ring no longer exists.
    #[error("signal was dropped before the connection was released")]
    SignalDropped,

    /// The handler had already been detached from the ring, through another
    /// handle, a scoped connection, `Signal::clear`, or because its receiver
    /// was dropped.
    #[error("handler was already detached from the signal")]
    AlreadyDetached,
}

impl ConnectionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use sigring::ConnectionError;
    ///
    /// assert_eq!(ConnectionError::SignalDropped.as_label(), "connection_signal_dropped");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConnectionError::Empty => "connection_empty",
            ConnectionError::SignalDropped => "connection_signal_dropped",
            ConnectionError::AlreadyDetached => "connection_already_detached",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConnectionError::Empty => "release on an empty connection".to_string(),
            ConnectionError::SignalDropped => "signal torn down; handler already gone".to_string(),
            ConnectionError::AlreadyDetached => "handler detached earlier; nothing to do".to_string(),
        }
    }
}
