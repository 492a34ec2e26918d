//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sigring::{Connection, Signal};

pub fn init_test_logging() {
    // Initialize tracing for tests if not already done
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sigring=trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Ordered record of which handlers ran.
pub type Trace = Rc<RefCell<Vec<&'static str>>>;

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// Connects a handler that appends `tag` to `trace` on every fire.
pub fn tagged<T: ?Sized + 'static>(signal: &Signal<T>, trace: &Trace, tag: &'static str) -> Connection<T> {
    let trace = Rc::clone(trace);
    signal.connect(move |_: &T| trace.borrow_mut().push(tag))
}

/// Drains the trace, returning what was recorded since the last call.
pub fn take(trace: &Trace) -> Vec<&'static str> {
    std::mem::take(&mut *trace.borrow_mut())
}
