//! # Signal: registration and dispatch.
//!
//! [`Signal<T>`] owns a handler ring and invokes every connected handler, in
//! registration order, each time [`Signal::fire`] is called with a `&T`.
//! Use a tuple for several arguments and `()` (the default) for none.
//!
//! ## Registration paths
//! | Method                            | Payload                                   | Stored data            |
//! |-----------------------------------|-------------------------------------------|------------------------|
//! | [`Signal::connect`]               | any `Fn(&T)` closure or function item     | the closure            |
//! | [`Signal::connect_static`]        | [`StaticHandler<T>`] marker type          | nothing                |
//! | [`Signal::connect_method`]        | receiver + `fn(&R, &T)` chosen at runtime | `Weak<R>` + fn pointer |
//! | [`Signal::connect_method_static`] | receiver + [`StaticMethod<R, T>`] marker  | `Weak<R>`              |
//! | [`Signal::with`] → [`With`]       | one receiver, several methods             | as the two rows above  |
//!
//! ## Re-entrancy
//! Handlers run with no internal borrow held, so from inside a handler it is
//! fine to fire the same signal again, connect new handlers, or release any
//! connection (including the handler's own):
//! - a released handler that has not run yet in this fire will not run;
//! - a handler connected during a fire first runs on the next fire;
//! - a nested fire is an independent pass over the ring as it is at that moment.
//!
//! ## Teardown
//! Dropping the signal detaches every handler. Connections that outlive it
//! become inert: `is_connected()` is `false` and releasing does nothing.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::SignalConfig;
use crate::connection::{Connection, ScopedConnection};
use crate::ring::{Ring, Traversal};
use crate::slots::{
    ClosureSlot, Delivery, FunctionSlot, MethodSlot, Slot, StaticHandler, StaticMethod,
    StaticMethodSlot,
};

use super::with::With;

/// Ordered, re-entrancy safe callback list.
///
/// Single-threaded by construction (`!Send`, `!Sync`).
///
/// # Example
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use sigring::Signal;
///
/// let order = Rc::new(RefCell::new(Vec::new()));
/// let signal: Signal = Signal::new();
///
/// let conns: Vec<_> = ["A", "B", "C"]
///     .into_iter()
///     .map(|tag| {
///         let order = Rc::clone(&order);
///         signal.connect(move |_| order.borrow_mut().push(tag))
///     })
///     .collect();
///
/// signal.notify();
/// assert_eq!(*order.borrow(), ["A", "B", "C"]);
///
/// let mut b = conns[1].clone();
/// b.release();
/// order.borrow_mut().clear();
/// signal.notify();
/// assert_eq!(*order.borrow(), ["A", "C"]);
/// ```
pub struct Signal<T: ?Sized + 'static = ()> {
    name: Cow<'static, str>,
    ring: Rc<RefCell<Ring<T>>>,
}

impl<T: ?Sized + 'static> Signal<T> {
    /// Creates an empty signal with [`SignalConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SignalConfig::default())
    }

    /// Creates an empty signal with the given configuration.
    #[must_use]
    pub fn with_config(config: SignalConfig) -> Self {
        let capacity = config.capacity_hint().unwrap_or(0);
        let ring = Ring::new(config.name.clone(), capacity);
        Self {
            name: config.name,
            ring: Rc::new(RefCell::new(ring)),
        }
    }

    /// Name from the configuration; used as the `signal` field in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of connected handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.borrow().len()
    }

    /// True if no handler is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Connects a closure (or function item) taking `&T`.
    ///
    /// The signature is checked here, at the call site:
    /// ```compile_fail
    /// use sigring::Signal;
    ///
    /// let signal: Signal<u32> = Signal::new();
    /// let _conn = signal.connect(|text: &str| println!("{text}"));
    /// ```
    pub fn connect<F>(&self, f: F) -> Connection<T>
    where
        F: Fn(&T) + 'static,
    {
        self.attach(Rc::new(ClosureSlot::new(f)))
    }

    /// Connects the free function named by the marker type `H`.
    pub fn connect_static<H>(&self) -> Connection<T>
    where
        H: StaticHandler<T> + 'static,
    {
        self.attach(Rc::new(FunctionSlot::<H>::new()))
    }

    /// Connects `method` bound to `receiver`.
    ///
    /// The signal holds the receiver weakly; once it is dropped the handler
    /// is detached on the next fire.
    pub fn connect_method<R>(&self, receiver: &Rc<R>, method: fn(&R, &T)) -> Connection<T>
    where
        R: 'static,
    {
        self.attach(Rc::new(MethodSlot::new(receiver, method)))
    }

    /// Connects the method named by the marker type `M`, bound to `receiver`.
    pub fn connect_method_static<R, M>(&self, receiver: &Rc<R>) -> Connection<T>
    where
        R: 'static,
        M: StaticMethod<R, T> + 'static,
    {
        self.attach(Rc::new(StaticMethodSlot::<R, M>::new(receiver)))
    }

    /// Binds `receiver` once to connect several of its methods.
    ///
    /// # Example
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use sigring::Signal;
    ///
    /// #[derive(Default)]
    /// struct Stats {
    ///     count: Cell<u32>,
    ///     total: Cell<u32>,
    /// }
    ///
    /// impl Stats {
    ///     fn count(&self, _: &u32) { self.count.set(self.count.get() + 1); }
    ///     fn total(&self, v: &u32) { self.total.set(self.total.get() + v); }
    /// }
    ///
    /// let stats = Rc::new(Stats::default());
    /// let signal: Signal<u32> = Signal::new();
    /// let with = signal.with(&stats);
    /// let _a = with.connect(Stats::count);
    /// let _b = with.connect(Stats::total);
    ///
    /// signal.fire(&3);
    /// signal.fire(&4);
    /// assert_eq!((stats.count.get(), stats.total.get()), (2, 7));
    /// ```
    pub fn with<R>(&self, receiver: &Rc<R>) -> With<'_, T, R>
    where
        R: 'static,
    {
        With::new(self, Rc::downgrade(receiver))
    }

    /// Connects a closure and wraps the connection in a [`ScopedConnection`].
    pub fn connect_scoped<F>(&self, f: F) -> ScopedConnection<T>
    where
        F: Fn(&T) + 'static,
    {
        ScopedConnection::new(self.connect(f))
    }

    /// Invokes every connected handler, in registration order, with `args`.
    ///
    /// Handlers connected while this call is running are not invoked by it.
    /// Handlers released before their turn are skipped. A panic in a handler
    /// propagates to the caller; the signal stays consistent.
    pub fn fire(&self, args: &T) {
        let mut pass = Traversal::begin(&self.ring);
        while let Some(slot) = pass.next() {
            if slot.invoke(args) == Delivery::ReceiverGone && pass.detach_current() {
                debug!(signal = %self.name, kind = %slot.kind(), "receiver dropped; handler detached");
            }
        }
    }

    /// Detaches every handler, as teardown does, but keeps the signal usable.
    ///
    /// Returns how many handlers were detached. Safe to call from a handler;
    /// the running fire then stops after the current handler.
    pub fn clear(&self) -> usize {
        let detached = Ring::update(&self.ring, Ring::teardown);
        trace!(signal = %self.name, detached, "signal cleared");
        detached
    }

    pub(crate) fn attach(&self, slot: Rc<dyn Slot<T>>) -> Connection<T> {
        let key = self.ring.borrow_mut().insert(slot);
        Connection::adopt(&self.ring, key)
    }
}

impl Signal<()> {
    /// Shorthand for `fire(&())`.
    pub fn notify(&self) {
        self.fire(&());
    }
}

impl<T: ?Sized + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

impl<T: ?Sized + 'static> Drop for Signal<T> {
    fn drop(&mut self) {
        let detached = Ring::update(&self.ring, Ring::teardown);
        let held = self.ring.borrow().allocated();
        if held > 0 {
            debug!(signal = %self.name, detached, held, "signal dropped with live connections");
        } else {
            trace!(signal = %self.name, detached, "signal dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn push(log: &Log, tag: &str) -> impl Fn(&str) + 'static {
        let log = Rc::clone(log);
        let tag = tag.to_owned();
        move |arg: &str| log.borrow_mut().push(format!("{tag}:{arg}"))
    }

    #[test]
    fn test_fire_empty_is_noop() {
        let signal: Signal<str> = Signal::new();
        signal.fire("nothing");
        assert!(signal.is_empty());
    }

    #[test]
    fn test_fire_in_registration_order() {
        let log = Log::default();
        let signal: Signal<str> = Signal::new();
        let _a = signal.connect(push(&log, "a"));
        let _b = signal.connect(push(&log, "b"));

        signal.fire("x");
        signal.fire("y");
        assert_eq!(*log.borrow(), ["a:x", "b:x", "a:y", "b:y"]);
    }

    #[test]
    fn test_dead_receiver_is_detached_on_fire() {
        struct Sink(Cell<u32>);
        impl Sink {
            fn take(&self, v: &u32) {
                self.0.set(self.0.get() + v);
            }
        }

        let signal: Signal<u32> = Signal::new();
        let sink = Rc::new(Sink(Cell::new(0)));
        let conn = signal.connect_method(&sink, Sink::take);
        let _other = signal.connect(|_| {});

        signal.fire(&1);
        assert_eq!(sink.0.get(), 1);

        drop(sink);
        assert!(conn.is_connected());
        signal.fire(&1);
        assert!(!conn.is_connected());
        assert_eq!(signal.len(), 1);
    }

    #[test]
    fn test_clear_detaches_everything() {
        let log = Log::default();
        let signal: Signal<str> = Signal::new();
        let a = signal.connect(push(&log, "a"));
        let b = signal.connect(push(&log, "b"));

        assert_eq!(signal.clear(), 2);
        signal.fire("x");
        assert!(log.borrow().is_empty());
        assert!(!a.is_connected() && !b.is_connected());

        let _c = signal.connect(push(&log, "c"));
        signal.fire("y");
        assert_eq!(*log.borrow(), ["c:y"]);
    }

    #[test]
    fn test_config_name_and_debug() {
        let signal: Signal<u8> = Signal::with_config(SignalConfig::default().with_name("tick"));
        let _c = signal.connect(|_| {});
        assert_eq!(signal.name(), "tick");
        assert_eq!(format!("{signal:?}"), r#"Signal { name: "tick", len: 1 }"#);
    }

    #[test]
    fn test_closure_owning_its_connection_is_dropped_cleanly() {
        let signal: Signal = Signal::new();
        let slot: Rc<RefCell<Connection>> = Rc::default();
        let inner = Rc::clone(&slot);
        *slot.borrow_mut() = signal.connect(move |_| inner.borrow_mut().release());
        drop(slot);

        signal.notify();
        assert!(signal.is_empty());
    }
}
