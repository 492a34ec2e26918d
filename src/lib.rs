//! # sigring
//!
//! **sigring** is a small, single-threaded signal/slot library for Rust.
//!
//! A [`Signal<T>`] holds an ordered list of handlers and calls each of them,
//! in registration order, every time it is fired with a `&T`. Each
//! registration returns a [`Connection`] that can remove the handler again;
//! a [`ScopedConnection`] does so automatically at the end of its scope.
//! Everything is synchronous and in-memory: no event loop, no threads, no
//! queues.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   connect / connect_static / connect_method / connect_method_static / with(..)
//!        │
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Signal<T>                                                        │
//! │   Rc<RefCell<Ring<T>>>                                            │
//! │                                                                   │
//! │   anchor ─► [slot] ─► [slot] ─► [slot] ─► anchor   (FIFO order)   │
//! │              ▲          ▲                                         │
//! └──────────────┼──────────┼─────────────────────────────────────────┘
//!                │ Weak     │ Weak
//!         ┌──────┴─────┐ ┌──┴─────────┐
//!         │ Connection │ │ Connection │ ◄── ScopedConnection (release on drop)
//!         └────────────┘ └────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! connect ──► node { linked, refs = 1 } ──► Connection
//!
//! fire(&args):
//!   limit = next sequence number
//!   walk from anchor:
//!     ├─ node registered after limit  ─► stop
//!     ├─ node detached                ─► skip (follow its old `next`)
//!     └─ node linked                  ─► invoke payload (no borrow held)
//!                                         └─ receiver gone ─► detach node
//!   outermost fire ends ─► reclaim nodes detached during the walk
//!
//! release ──► detach + drop share      clone ──► share + 1      drop ──► share - 1
//! drop(Signal) ──► detach everything; surviving Connections become inert
//! ```
//!
//! ## Features
//! | Area               | Description                                                        | Key types                                   |
//! |--------------------|--------------------------------------------------------------------|---------------------------------------------|
//! | **Dispatch**       | Ordered, re-entrancy safe synchronous fan-out                      | [`Signal`]                                  |
//! | **Bindings**       | Closures, compile-time functions, bound methods (runtime / static) | [`StaticHandler`], [`StaticMethod`], [`With`] |
//! | **Handles**        | Shared-count connections, explicit and scoped release              | [`Connection`], [`ScopedConnection`]        |
//! | **Errors**         | Diagnostic reasons for a no-op release                             | [`ConnectionError`]                         |
//! | **Configuration**  | Per-signal name (log field) and pre-allocation                     | [`SignalConfig`]                            |
//!
//! ## Logging
//! The crate emits [`tracing`] events (target `sigring`) with the signal name
//! as the `signal` field: `trace` for connect / release / fire, `debug` for
//! handlers dropped with their receiver and signals dropped while
//! connections are still held. Install any subscriber to see them.
//!
//! ## Example
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use sigring::{ScopedConnection, Signal};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let clicked: Signal<(i32, i32)> = Signal::new();
//!
//! let log = Rc::clone(&seen);
//! let mut conn = clicked.connect(move |&(x, y)| log.borrow_mut().push(format!("click {x},{y}")));
//!
//! {
//!     let log = Rc::clone(&seen);
//!     let _scoped: ScopedConnection<_> = clicked.connect_scoped(move |_| log.borrow_mut().push("scoped".into()));
//!     clicked.fire(&(1, 2));
//! }
//! clicked.fire(&(3, 4));
//! conn.release();
//! clicked.fire(&(5, 6));
//!
//! assert_eq!(*seen.borrow(), ["click 1,2", "scoped", "click 3,4"]);
//! ```

mod config;
mod connection;
mod error;
mod ring;
mod signal;
mod slots;

// ---- Public re-exports ----

pub use config::SignalConfig;
pub use connection::{Connection, ScopedConnection};
pub use error::ConnectionError;
pub use signal::{Signal, With};
pub use slots::{SlotKind, StaticHandler, StaticMethod};
