//! # One fire pass over the ring.
//!
//! A [`Traversal`] walks the ring from the anchor's successor back to the
//! anchor and yields the payload of every linked node registered before it
//! began. The ring is only borrowed while the next step is computed, never
//! while the yielded payload runs, so handlers may freely fire, connect and
//! release on the same signal.
//!
//! ## Stepping rules
//! ```text
//! anchor ─► [A] ─► [B] ─► [C] ─► anchor
//!            ▲
//!            position: the successor is read only after A's payload returns
//! ```
//! - A handler releasing itself: its node keeps its old `next`, so the walk
//!   continues to B.
//! - A handler releasing B before B is reached: A is re-linked to C, so B is
//!   never yielded.
//! - A handler connecting D: D's sequence number is past the limit, so the
//!   walk stops before it. The next fire sees D.
//!
//! Reclamation is pinned for the lifetime of the traversal; dropping it (also
//! on unwind) releases the pin and lets the outermost traversal sweep.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::slots::Slot;

use super::arena::NodeKey;
use super::list::{Ring, Step};

#[derive(Clone, Copy)]
enum Position {
    Anchor,
    At(NodeKey),
    Finished,
}

pub(crate) struct Traversal<'r, T: ?Sized + 'static> {
    ring: &'r RefCell<Ring<T>>,
    position: Position,
    limit: u64,
}

impl<'r, T: ?Sized + 'static> Traversal<'r, T> {
    pub(crate) fn begin(ring: &'r RefCell<Ring<T>>) -> Self {
        let limit = ring.borrow_mut().begin_traversal();
        trace!(signal = %ring.borrow().name(), limit, "fire started");
        Self {
            ring,
            position: Position::Anchor,
            limit,
        }
    }

    /// Detaches the node whose payload was yielded last.
    pub(crate) fn detach_current(&mut self) -> bool {
        match self.position {
            Position::At(key) => Ring::update(self.ring, |ring| ring.detach(key)),
            Position::Anchor | Position::Finished => false,
        }
    }
}

impl<T: ?Sized + 'static> Iterator for Traversal<'_, T> {
    type Item = Rc<dyn Slot<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let ring = self.ring.borrow();
        loop {
            let next = match self.position {
                Position::Finished => return None,
                Position::Anchor => ring.first(),
                Position::At(key) => ring.successor(key),
            };
            let Some(key) = next else {
                self.position = Position::Finished;
                return None;
            };
            match ring.step(key, self.limit) {
                Step::Invoke(slot) => {
                    self.position = Position::At(key);
                    return Some(slot);
                }
                Step::Skip => self.position = Position::At(key),
                Step::Stop => {
                    self.position = Position::Finished;
                    return None;
                }
            }
        }
    }
}

impl<T: ?Sized + 'static> Drop for Traversal<'_, T> {
    fn drop(&mut self) {
        Ring::update(self.ring, Ring::end_traversal);
        trace!(signal = %self.ring.borrow().name(), "fire finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    use crate::slots::ClosureSlot;

    fn ring_with(n: usize) -> (RefCell<Ring<()>>, Vec<NodeKey>) {
        let ring = RefCell::new(Ring::new(Cow::Borrowed("walk"), n));
        let keys = (0..n)
            .map(|_| {
                let slot: Rc<dyn Slot<()>> = Rc::new(ClosureSlot::new(|_: &()| {}));
                ring.borrow_mut().insert(slot)
            })
            .collect();
        (ring, keys)
    }

    #[test]
    fn test_yields_every_linked_node() {
        let (ring, _) = ring_with(3);
        assert_eq!(Traversal::begin(&ring).count(), 3);
    }

    #[test]
    fn test_empty_ring_yields_nothing() {
        let (ring, _) = ring_with(0);
        let mut walk = Traversal::begin(&ring);
        assert!(walk.next().is_none());
        assert!(!walk.detach_current());
    }

    #[test]
    fn test_skips_node_detached_ahead() {
        let (ring, keys) = ring_with(3);
        let mut walk = Traversal::begin(&ring);

        assert!(walk.next().is_some());
        Ring::update(&ring, |r| r.detach(keys[1]));
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert!(matches!(walk.position, Position::Finished));
    }

    #[test]
    fn test_continues_after_current_detached() {
        let (ring, _) = ring_with(3);
        let mut walk = Traversal::begin(&ring);

        walk.next();
        assert!(walk.detach_current());
        assert_eq!(walk.by_ref().count(), 2);
    }

    #[test]
    fn test_drop_releases_traversal_pin() {
        let (ring, keys) = ring_with(2);
        for key in &keys {
            Ring::update(&ring, |r| r.release_ref(*key));
        }
        {
            let mut walk = Traversal::begin(&ring);
            walk.next();
            walk.detach_current();
            assert_eq!(ring.borrow().allocated(), 2, "pinned while walking");
        }
        assert_eq!(ring.borrow().allocated(), 1);
    }
}
