//! The user-facing signal type.
//!
//! - [`Signal`]: owns the handler ring; registration, `fire`, teardown.
//! - [`With`]: binds one receiver for several method registrations.

mod core;
mod with;

pub use self::core::Signal;
pub use with::With;
