//! Handler node: one registered slot plus its ring bookkeeping.

use std::rc::Rc;

use crate::slots::Slot;

use super::arena::NodeKey;

/// Neighbour links. `None` stands for the anchor (sentinel).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) prev: Option<NodeKey>,
    pub(crate) next: Option<NodeKey>,
}

/// One registered handler.
///
/// Ownership is split in two:
/// - `linked`: the ring's share, dropped by detaching;
/// - `refs`: external [`Connection`](crate::Connection) shares, starting at 1
///   for the handle returned by registration.
///
/// The node may be reclaimed once both are gone.
pub(crate) struct Node<T: ?Sized + 'static> {
    pub(crate) links: Links,
    pub(crate) linked: bool,
    pub(crate) refs: usize,
    pub(crate) seq: u64,
    pub(crate) slot: Rc<dyn Slot<T>>,
}

impl<T: ?Sized + 'static> Node<T> {
    pub(crate) fn new(slot: Rc<dyn Slot<T>>, seq: u64, links: Links) -> Self {
        Self {
            links,
            linked: true,
            refs: 1,
            seq,
            slot,
        }
    }

    /// True when neither the ring nor any handle owns the node.
    #[inline]
    pub(crate) fn is_orphaned(&self) -> bool {
        !self.linked && self.refs == 0
    }
}
