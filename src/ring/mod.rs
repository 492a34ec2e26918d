//! Handler ring: storage, linkage and traversal.
//!
//! This module is the internal engine behind [`Signal`](crate::Signal) and
//! [`Connection`](crate::Connection). Nothing here is public.
//!
//! ```text
//!            ┌───────────────────────── anchor (sentinel) ◄────────────────────────┐
//!            ▼                                                                      │
//!   [node seq=0] ◄──► [node seq=1] ◄──► [node seq=2] ◄──► ... ◄──► [node seq=n] ────┘
//!      linked            linked           detached*
//!      refs=1            refs=2           refs=1
//!
//!   * detached nodes stay allocated while a handle or an active traversal needs them
//! ```
//!
//! Internal modules:
//! - [`arena`]: generational storage; keys never alias a reused slot;
//! - [`node`]: per-handler links, `linked` flag, handle count, sequence number;
//! - [`list`]: insert / detach / teardown and deferred reclamation;
//! - [`traversal`]: one fire pass, safe against re-entrant mutation.

mod arena;
mod list;
mod node;
mod traversal;

pub(crate) use arena::NodeKey;
pub(crate) use list::Ring;
pub(crate) use traversal::Traversal;
