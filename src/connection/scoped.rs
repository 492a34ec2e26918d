//! # Scoped connection
//!
//! [`ScopedConnection`] owns one [`Connection`] and **releases** it when it
//! goes out of scope, no matter how many other handles share the handler.
//!
//! ## Rules
//! - Drop calls `release`, not a plain handle drop.
//! - [`ScopedConnection::set`] releases the previous connection before
//!   taking the new one.
//!
//! ## Example
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use sigring::{ScopedConnection, Signal};
//!
//! let hits = Rc::new(Cell::new(0));
//! let signal: Signal = Signal::new();
//! {
//!     let h = Rc::clone(&hits);
//!     let _guard = ScopedConnection::new(signal.connect(move |_| h.set(h.get() + 1)));
//!     signal.notify();
//! }
//! signal.notify();
//! assert_eq!(hits.get(), 1);
//! ```

use std::fmt;

use super::handle::Connection;

/// Connection that is released when dropped or replaced.
#[must_use = "a ScopedConnection disconnects its handler as soon as it is dropped"]
pub struct ScopedConnection<T: ?Sized + 'static = ()> {
    connection: Connection<T>,
}

impl<T: ?Sized + 'static> ScopedConnection<T> {
    /// Takes ownership of `connection`.
    pub fn new(connection: Connection<T>) -> Self {
        Self { connection }
    }

    /// Releases the current connection, then holds `connection` instead.
    pub fn set(&mut self, connection: Connection<T>) {
        self.connection.release();
        self.connection = connection;
    }

    /// Releases the held connection now; the guard stays usable via [`set`](Self::set).
    pub fn release(&mut self) {
        self.connection.release();
    }

    /// The wrapped connection.
    pub fn connection(&self) -> &Connection<T> {
        &self.connection
    }

    /// See [`Connection::is_connected`].
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }
}

impl<T: ?Sized + 'static> From<Connection<T>> for ScopedConnection<T> {
    fn from(connection: Connection<T>) -> Self {
        Self::new(connection)
    }
}

impl<T: ?Sized + 'static> Default for ScopedConnection<T> {
    fn default() -> Self {
        Self::new(Connection::empty())
    }
}

impl<T: ?Sized + 'static> Drop for ScopedConnection<T> {
    fn drop(&mut self) {
        self.connection.release();
    }
}

impl<T: ?Sized + 'static> fmt::Debug for ScopedConnection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedConnection")
            .field(&self.connection)
            .finish()
    }
}
