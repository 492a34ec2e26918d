//! # Core slot trait.
//!
//! `Slot` is the type-erased payload stored in a handler node. The ring only
//! ever sees `Rc<dyn Slot<T>>`, which it clones out before invoking so that no
//! ring borrow is held while user code runs.

use std::fmt;

/// Outcome of a single slot invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    /// The payload ran.
    Delivered,
    /// The bound receiver no longer exists; the payload did not run.
    ReceiverGone,
}

/// Which registration path produced a handler.
///
/// Exposed through [`Connection::kind`](crate::Connection::kind) for
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// A stored closure or callable value.
    Closure,
    /// A free function fixed at compile time via [`StaticHandler`](crate::StaticHandler).
    Function,
    /// A receiver plus a method pointer chosen at registration time.
    Method,
    /// A receiver plus a method fixed at compile time via [`StaticMethod`](crate::StaticMethod).
    StaticMethod,
}

impl SlotKind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SlotKind::Closure => "closure",
            SlotKind::Function => "function",
            SlotKind::Method => "method",
            SlotKind::StaticMethod => "static_method",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Type-erased handler payload.
pub(crate) trait Slot<T: ?Sized> {
    /// Runs the payload with the fired arguments.
    fn invoke(&self, args: &T) -> Delivery;

    /// Registration path this payload came from.
    fn kind(&self) -> SlotKind;
}
