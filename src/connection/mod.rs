//! Connection handles returned by signal registration.
//!
//! - [`Connection`]: shared-count handle; dropping it keeps the handler,
//!   releasing it removes the handler.
//! - [`ScopedConnection`]: guard that releases its connection at scope end.

mod handle;
mod scoped;

pub use handle::Connection;
pub use scoped::ScopedConnection;
