//! # Handler payloads.
//!
//! Every node in the handler ring carries one slot: the thing that actually
//! runs when the signal fires. The four variants differ only in what they call.
//!
//! ```text
//! Signal::connect(f)                   ──► ClosureSlot<F>            (stored Fn(&T))
//! Signal::connect_static::<H>()        ──► FunctionSlot<H>           (H::handle, no data)
//! Signal::connect_method(&rc, m)       ──► MethodSlot<R>             (Weak<R> + fn(&R, &T))
//! Signal::connect_method_static::<R, M>(&rc)
//!                                      ──► StaticMethodSlot<R, M>    (Weak<R>, M::call)
//! ```
//!
//! ## Rules
//! - Signatures are checked when a slot is built; a mismatched callable is a
//!   compile error at the registration call site.
//! - Method slots never keep their receiver alive. Once the receiver is
//!   dropped they report [`Delivery::ReceiverGone`] and the firing signal
//!   detaches them.

mod closure;
mod function;
mod method;
mod slot;

pub(crate) use closure::ClosureSlot;
pub(crate) use function::FunctionSlot;
pub(crate) use method::{MethodSlot, StaticMethodSlot};
pub(crate) use slot::{Delivery, Slot};

pub use function::StaticHandler;
pub use method::StaticMethod;
pub use slot::SlotKind;
