//! # Receiver-bound slots
//!
//! Two ways to bind a handler to an instance:
//! - [`MethodSlot`]: the method is a runtime value (`fn(&R, &T)`), chosen at
//!   registration time.
//! - [`StaticMethodSlot`]: the method is named by a [`StaticMethod`] type, so
//!   only the receiver is stored.
//!
//! Both hold the receiver through a `Weak<R>`. A signal never extends the
//! lifetime of the objects it notifies; once the receiver is gone the slot
//! reports [`Delivery::ReceiverGone`] instead of calling anything.
//!
//! ## Example
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use sigring::Signal;
//!
//! #[derive(Default)]
//! struct Counter {
//!     hits: Cell<u32>,
//! }
//!
//! impl Counter {
//!     fn bump(&self, by: &u32) {
//!         self.hits.set(self.hits.get() + by);
//!     }
//! }
//!
//! let counter = Rc::new(Counter::default());
//! let signal: Signal<u32> = Signal::new();
//! let _conn = signal.connect_method(&counter, Counter::bump);
//!
//! signal.fire(&2);
//! assert_eq!(counter.hits.get(), 2);
//! ```

use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use super::slot::{Delivery, Slot, SlotKind};

/// A method of `R` fixed at compile time.
///
/// Implement it on a marker type and register with
/// [`Signal::connect_method_static`](crate::Signal::connect_method_static) or
/// [`With::connect_static`](crate::With::connect_static).
pub trait StaticMethod<R: ?Sized, T: ?Sized> {
    /// Called once per fire with the bound receiver and the fired arguments.
    fn call(receiver: &R, args: &T);
}

/// Receiver plus runtime-selected method pointer.
pub(crate) struct MethodSlot<R, T: ?Sized> {
    receiver: Weak<R>,
    method: fn(&R, &T),
}

impl<R, T: ?Sized> MethodSlot<R, T> {
    pub(crate) fn new(receiver: &Rc<R>, method: fn(&R, &T)) -> Self {
        Self {
            receiver: Rc::downgrade(receiver),
            method,
        }
    }

    pub(crate) fn from_weak(receiver: Weak<R>, method: fn(&R, &T)) -> Self {
        Self { receiver, method }
    }
}

impl<R, T: ?Sized> Slot<T> for MethodSlot<R, T> {
    fn invoke(&self, args: &T) -> Delivery {
        match self.receiver.upgrade() {
            Some(receiver) => {
                (self.method)(&receiver, args);
                Delivery::Delivered
            }
            None => Delivery::ReceiverGone,
        }
    }

    fn kind(&self) -> SlotKind {
        SlotKind::Method
    }
}

/// Receiver plus compile-time method; only the receiver is stored.
pub(crate) struct StaticMethodSlot<R, M> {
    receiver: Weak<R>,
    _method: PhantomData<fn() -> M>,
}

impl<R, M> StaticMethodSlot<R, M> {
    pub(crate) fn new(receiver: &Rc<R>) -> Self {
        Self::from_weak(Rc::downgrade(receiver))
    }

    pub(crate) fn from_weak(receiver: Weak<R>) -> Self {
        Self {
            receiver,
            _method: PhantomData,
        }
    }
}

impl<R, T, M> Slot<T> for StaticMethodSlot<R, M>
where
    T: ?Sized,
    M: StaticMethod<R, T>,
{
    fn invoke(&self, args: &T) -> Delivery {
        match self.receiver.upgrade() {
            Some(receiver) => {
                M::call(&receiver, args);
                Delivery::Delivered
            }
            None => Delivery::ReceiverGone,
        }
    }

    fn kind(&self) -> SlotKind {
        SlotKind::StaticMethod
    }
}
