//! # Connection handle
//!
//! [`Connection`] is the external, shared-count reference to one registered
//! handler, returned by every `Signal::connect*` call.
//!
//! ## Ownership
//! ```text
//! Signal::connect ──► node { linked: true, refs: 1 } ◄── Connection
//!
//! conn.clone()     ─► refs + 1
//! drop(conn)       ─► refs - 1              (handler stays connected)
//! conn.release()   ─► linked = false, refs - 1, conn becomes empty
//!
//! node reclaimed once !linked && refs == 0, whichever happens last
//! ```
//!
//! ## Rules
//! - Dropping a connection never disconnects the handler; only
//!   [`Connection::release`] (or a [`ScopedConnection`](crate::ScopedConnection)) does.
//! - `release` is idempotent and never fails; [`Connection::try_release`]
//!   reports *why* nothing was detached.
//! - A connection holds a weak reference to its signal. Outliving the signal
//!   is fine: the handle just turns inert.
//!
//! ## Example
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use sigring::Signal;
//!
//! let hits = Rc::new(Cell::new(0));
//! let signal: Signal = Signal::new();
//!
//! let h = Rc::clone(&hits);
//! let conn = signal.connect(move |_| h.set(h.get() + 1));
//! let mut copy = conn.clone();
//! drop(conn);
//!
//! signal.notify();
//! assert_eq!(hits.get(), 1, "dropping a handle keeps the handler");
//!
//! copy.release();
//! signal.notify();
//! assert_eq!(hits.get(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::error::ConnectionError;
use crate::ring::{NodeKey, Ring};
use crate::slots::SlotKind;

struct Target<T: ?Sized + 'static> {
    ring: Weak<RefCell<Ring<T>>>,
    key: NodeKey,
}

/// Shared handle to one registered handler.
///
/// `T` is the argument type of the signal the handler was registered on.
#[must_use = "dropping a Connection keeps the handler connected; call release() to disconnect"]
pub struct Connection<T: ?Sized + 'static = ()> {
    target: Option<Target<T>>,
}

impl<T: ?Sized + 'static> Connection<T> {
    /// Wraps the share that `Ring::insert` already accounted for.
    pub(crate) fn adopt(ring: &Rc<RefCell<Ring<T>>>, key: NodeKey) -> Self {
        Self {
            target: Some(Target {
                ring: Rc::downgrade(ring),
                key,
            }),
        }
    }

    /// Creates a handle that references nothing.
    pub fn empty() -> Self {
        Self { target: None }
    }

    /// True if this handle references no handler.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }

    /// True while the handler is still linked into a live signal, i.e. it
    /// will run on the next fire.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.with_ring(|ring, key| ring.is_linked(key))
            .unwrap_or(false)
    }

    /// Number of handles (this one included) sharing the handler.
    ///
    /// `None` for an empty handle or once the signal is gone.
    #[must_use]
    pub fn handle_count(&self) -> Option<usize> {
        self.with_ring(|ring, key| ring.handle_count(key)).flatten()
    }

    /// Registration path of the handler, while the signal is alive.
    #[must_use]
    pub fn kind(&self) -> Option<SlotKind> {
        self.with_ring(|ring, key| ring.kind(key)).flatten()
    }

    /// Detaches the handler and gives up this handle's share.
    ///
    /// Idempotent: the handle is empty afterwards, so further calls do
    /// nothing. Safe to call from inside the handler itself while the signal
    /// is firing; the current invocation finishes, later ones do not happen.
    pub fn release(&mut self) {
        let _ = self.try_release();
    }

    /// Same as [`Connection::release`], but reports why nothing was detached.
    ///
    /// The handle is empty afterwards whatever the outcome.
    ///
    /// # Errors
    /// - [`ConnectionError::Empty`] if the handle referenced nothing;
    /// - [`ConnectionError::SignalDropped`] if the signal no longer exists;
    /// - [`ConnectionError::AlreadyDetached`] if the handler had already been
    ///   detached (through another handle, a scoped connection, `clear`, or a
    ///   dropped receiver).
    pub fn try_release(&mut self) -> Result<(), ConnectionError> {
        let target = self.target.take().ok_or(ConnectionError::Empty)?;
        let ring = target.ring.upgrade().ok_or(ConnectionError::SignalDropped)?;

        let detached = Ring::update(&ring, |ring| {
            let detached = ring.detach(target.key);
            ring.release_ref(target.key);
            trace!(signal = %ring.name(), key = ?target.key, detached, "connection released");
            detached
        });

        if detached {
            Ok(())
        } else {
            Err(ConnectionError::AlreadyDetached)
        }
    }

    /// Moves the handle out, leaving an empty one in its place.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn with_ring<R>(&self, f: impl FnOnce(&Ring<T>, NodeKey) -> R) -> Option<R> {
        let target = self.target.as_ref()?;
        let ring = target.ring.upgrade()?;
        let ring = ring.borrow();
        Some(f(&ring, target.key))
    }
}

impl<T: ?Sized + 'static> Clone for Connection<T> {
    /// Shares the handler; the new handle holds its own count.
    fn clone(&self) -> Self {
        let Some(target) = self.target.as_ref() else {
            return Self::empty();
        };
        let Some(ring) = target.ring.upgrade() else {
            // signal gone: nothing left to count against
            return Self {
                target: Some(Target {
                    ring: Weak::clone(&target.ring),
                    key: target.key,
                }),
            };
        };
        if !ring.borrow_mut().acquire(target.key) {
            return Self::empty();
        }
        Self {
            target: Some(Target {
                ring: Rc::downgrade(&ring),
                key: target.key,
            }),
        }
    }
}

impl<T: ?Sized + 'static> Drop for Connection<T> {
    fn drop(&mut self) {
        let Some(target) = self.target.take() else {
            return;
        };
        if let Some(ring) = target.ring.upgrade() {
            Ring::update(&ring, |ring| ring.release_ref(target.key));
        }
    }
}

impl<T: ?Sized + 'static> Default for Connection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Connection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("key", &self.target.as_ref().map(|t| t.key))
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signal;
    use std::cell::Cell;

    fn counting(signal: &Signal, hits: &Rc<Cell<u32>>) -> Connection {
        let hits = Rc::clone(hits);
        signal.connect(move |_| hits.set(hits.get() + 1))
    }

    #[test]
    fn test_clone_increments_and_drop_decrements() {
        let signal = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let conn = counting(&signal, &hits);
        assert_eq!(conn.handle_count(), Some(1));

        let copy = conn.clone();
        assert_eq!(conn.handle_count(), Some(2));
        drop(copy);
        assert_eq!(conn.handle_count(), Some(1));
    }

    #[test]
    fn test_release_is_idempotent() {
        let signal = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let mut conn = counting(&signal, &hits);

        assert_eq!(conn.try_release(), Ok(()));
        assert!(conn.is_empty());
        assert_eq!(conn.try_release(), Err(ConnectionError::Empty));
        conn.release();

        signal.notify();
        assert_eq!(hits.get(), 0);
        assert!(signal.is_empty());
    }

    #[test]
    fn test_release_through_copy_reports_already_detached() {
        let signal = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let mut conn = counting(&signal, &hits);
        let mut copy = conn.clone();

        assert_eq!(copy.try_release(), Ok(()));
        assert!(!conn.is_connected());
        assert_eq!(conn.handle_count(), Some(1));
        assert_eq!(conn.try_release(), Err(ConnectionError::AlreadyDetached));
    }

    #[test]
    fn test_move_transfers_without_counting() {
        let signal = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let mut conn = counting(&signal, &hits);

        let moved = conn.take();
        assert!(conn.is_empty());
        assert_eq!(moved.handle_count(), Some(1));
        assert!(moved.is_connected());
    }

    #[test]
    fn test_handle_outlives_signal() {
        let signal = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let mut conn = counting(&signal, &hits);
        let copy = conn.clone();

        drop(signal);
        assert!(!conn.is_connected());
        assert_eq!(conn.handle_count(), None);
        assert_eq!(conn.kind(), None);

        let again = copy.clone();
        drop(copy);
        drop(again);
        assert_eq!(conn.try_release(), Err(ConnectionError::SignalDropped));
    }

    #[test]
    fn test_empty_connection_is_inert() {
        let mut conn: Connection<u8> = Connection::default();
        assert!(conn.is_empty());
        assert!(!conn.is_connected());
        assert_eq!(conn.clone().handle_count(), None);
        conn.release();
    }

    #[test]
    fn test_kind_reports_registration_path() {
        let signal: Signal = Signal::new();
        let conn = signal.connect(|_| {});
        assert_eq!(conn.kind(), Some(SlotKind::Closure));
    }
}
