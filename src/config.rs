//! # Signal configuration.
//!
//! Provides [`SignalConfig`], the per-signal settings passed to
//! [`Signal::with_config`](crate::Signal::with_config).
//!
//! ## Sentinel values
//! - `capacity = 0` → no pre-allocation (the ring grows on demand)
//!
//! # Example
//! ```
//! use sigring::{Signal, SignalConfig};
//!
//! let cfg = SignalConfig::default()
//!     .with_name("window-resized")
//!     .with_capacity(8);
//!
//! let resized: Signal<(u32, u32)> = Signal::with_config(cfg);
//! assert_eq!(resized.name(), "window-resized");
//! ```

use std::borrow::Cow;

/// Settings for a single [`Signal`](crate::Signal).
///
/// ## Field semantics
/// - `name`: label attached to every log event emitted for this signal and shown by `Debug`
/// - `capacity`: number of handler nodes to pre-allocate (`0` = none)
///
/// ## Notes
/// All fields are public. Prefer [`SignalConfig::capacity_hint`] over checking
/// the `0` sentinel by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalConfig {
    /// Label used in `tracing` fields and `Debug` output.
    pub name: Cow<'static, str>,

    /// Initial handler storage capacity.
    ///
    /// - `0` = no pre-allocation
    /// - `n > 0` = room for `n` handlers before the ring reallocates
    pub capacity: usize,
}

impl SignalConfig {
    /// Returns the pre-allocation request as an `Option`.
    ///
    /// - `None` → allocate lazily
    /// - `Some(n)` → reserve room for `n` handlers up front
    #[inline]
    pub fn capacity_hint(&self) -> Option<usize> {
        if self.capacity == 0 {
            None
        } else {
            Some(self.capacity)
        }
    }

    /// Replaces the signal name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the initial capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for SignalConfig {
    /// Default configuration:
    ///
    /// - `name = "signal"`
    /// - `capacity = 0` (no pre-allocation)
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("signal"),
            capacity: 0,
        }
    }
}
