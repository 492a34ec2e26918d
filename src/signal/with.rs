//! Receiver binder returned by [`Signal::with`].

use std::rc::{Rc, Weak};

use crate::connection::Connection;
use crate::slots::{MethodSlot, StaticMethod, StaticMethodSlot};

use super::core::Signal;

/// One receiver bound to a signal, ready to connect several of its methods.
///
/// Holds the receiver weakly, like every method registration.
pub struct With<'s, T: ?Sized + 'static, R: 'static> {
    signal: &'s Signal<T>,
    receiver: Weak<R>,
}

impl<'s, T: ?Sized + 'static, R: 'static> With<'s, T, R> {
    pub(crate) fn new(signal: &'s Signal<T>, receiver: Weak<R>) -> Self {
        Self { signal, receiver }
    }

    /// Connects `method`, chosen at runtime, on the bound receiver.
    pub fn connect(&self, method: fn(&R, &T)) -> Connection<T> {
        self.signal.attach(Rc::new(MethodSlot::from_weak(
            Weak::clone(&self.receiver),
            method,
        )))
    }

    /// Connects the compile-time method `M` on the bound receiver.
    pub fn connect_static<M>(&self) -> Connection<T>
    where
        M: StaticMethod<R, T> + 'static,
    {
        self.signal
            .attach(Rc::new(StaticMethodSlot::<R, M>::from_weak(Weak::clone(
                &self.receiver,
            ))))
    }
}
