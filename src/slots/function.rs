//! # Compile-time function slot (`FunctionSlot`)
//!
//! [`StaticHandler`] names a free function through a type instead of a value.
//! The slot built from it stores no data at all: the call target is resolved
//! when the slot is monomorphized.
//!
//! ## Example
//! ```rust
//! use std::cell::Cell;
//! use sigring::{Signal, StaticHandler};
//!
//! thread_local! {
//!     static TOTAL: Cell<u32> = Cell::new(0);
//! }
//!
//! struct Accumulate;
//!
//! impl StaticHandler<u32> for Accumulate {
//!     fn handle(value: &u32) {
//!         TOTAL.with(|t| t.set(t.get() + *value));
//!     }
//! }
//!
//! let signal: Signal<u32> = Signal::new();
//! let _conn = signal.connect_static::<Accumulate>();
//! signal.fire(&5);
//! signal.fire(&6);
//! assert_eq!(TOTAL.with(Cell::get), 11);
//! ```

use std::marker::PhantomData;

use super::slot::{Delivery, Slot, SlotKind};

/// A free function fixed at compile time.
///
/// Implement it on a marker type and register with
/// [`Signal::connect_static`](crate::Signal::connect_static).
pub trait StaticHandler<T: ?Sized> {
    /// Called once per fire with the fired arguments.
    fn handle(args: &T);
}

/// Slot for a [`StaticHandler`]; zero-sized.
pub(crate) struct FunctionSlot<H> {
    // fn() -> H keeps the slot free of H's auto-trait and drop obligations
    _handler: PhantomData<fn() -> H>,
}

impl<H> FunctionSlot<H> {
    pub(crate) fn new() -> Self {
        Self {
            _handler: PhantomData,
        }
    }
}

impl<T, H> Slot<T> for FunctionSlot<H>
where
    T: ?Sized,
    H: StaticHandler<T>,
{
    fn invoke(&self, args: &T) -> Delivery {
        H::handle(args);
        Delivery::Delivered
    }

    fn kind(&self) -> SlotKind {
        SlotKind::Function
    }
}
