//! Closure-backed slot (`ClosureSlot`).
//!
//! Wraps any `F: Fn(&T)`. Free functions passed to `connect` land here too;
//! function items are zero-sized, so nothing but the vtable is stored.

use super::slot::{Delivery, Slot, SlotKind};

/// Stored callable value.
pub(crate) struct ClosureSlot<F> {
    f: F,
}

impl<F> ClosureSlot<F> {
    pub(crate) fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> Slot<T> for ClosureSlot<F>
where
    T: ?Sized,
    F: Fn(&T), // Fn, not FnMut: a nested fire may re-enter the same closure
{
    fn invoke(&self, args: &T) -> Delivery {
        (self.f)(args);
        Delivery::Delivered
    }

    fn kind(&self) -> SlotKind {
        SlotKind::Closure
    }
}
