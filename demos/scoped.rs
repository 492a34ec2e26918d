//! # Example: scoped
//!
//! Shows connection lifetimes: scoped guards, handlers that remove
//! themselves, and handles that outlive their signal.
//!
//! Demonstrates how to:
//! - Tie a handler to a scope with [`ScopedConnection`].
//! - Release a handler from inside itself (one-shot handler).
//! - Keep a [`Connection`] after the [`Signal`] is dropped.
//!
//! ## Flow
//! ```text
//! closed: Signal<str>
//!     ├─► ScopedConnection (dialog)  ── released when the block ends
//!     ├─► one-shot handler           ── releases itself on first fire
//!     ├─► fire("save"), fire("quit")
//!     └─► drop(closed)               ── remaining Connection turns inert
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=sigring=debug cargo run --example scoped
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use sigring::{Connection, ConnectionError, ScopedConnection, Signal};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let closed: Signal<str> = Signal::new();
    let mut audit = closed.connect(|reason: &str| println!("[audit] closed: {reason}"));

    // One-shot: the handler owns a slot holding its own connection
    let once: Rc<RefCell<Connection<str>>> = Rc::default();
    let me = Rc::clone(&once);
    *once.borrow_mut() = closed.connect(move |reason: &str| {
        println!("[once] first close was {reason:?}");
        me.borrow_mut().release();
    });

    {
        let _dialog: ScopedConnection<str> =
            closed.connect_scoped(|reason: &str| println!("[dialog] closing because {reason}"));
        closed.fire("save");
    }

    closed.fire("quit");
    println!("{} handlers left", closed.len());

    drop(closed);
    match audit.try_release() {
        Err(ConnectionError::SignalDropped) => println!("[audit] signal already gone"),
        other => println!("[audit] release: {other:?}"),
    }
}
