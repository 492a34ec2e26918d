//! # Handler ring
//!
//! [`Ring`] is the circular, doubly linked list of handler nodes behind every
//! [`Signal`](crate::Signal). Nodes live in a generational [`Arena`]; the
//! sentinel is the `anchor` field, which only carries the first/last links.
//!
//! ## Reclamation
//! A node is reclaimed when it is unlinked **and** no handle references it.
//! While any traversal is running, reclamation is deferred: keys go to the
//! `deferred` list and are swept when the outermost traversal ends. This is
//! what lets a traversal stand on a node its own handler just detached and
//! still step to that node's old successor.
//!
//! Reclaimed payloads are parked in `reclaimed` and only dropped by
//! [`Ring::update`] after the `RefCell` borrow is released, since dropping a
//! closure may drop a [`Connection`](crate::Connection) that re-enters the ring.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::slots::{Slot, SlotKind};

use super::arena::{Arena, NodeKey};
use super::node::{Links, Node};

/// What a traversal should do at a given node.
pub(crate) enum Step<T: ?Sized + 'static> {
    /// Node is linked and was registered before the traversal began.
    Invoke(Rc<dyn Slot<T>>),
    /// Node is detached; walk past it.
    Skip,
    /// Node was registered after the traversal began (or vanished).
    Stop,
}

pub(crate) struct Ring<T: ?Sized + 'static> {
    name: Cow<'static, str>,
    nodes: Arena<Node<T>>,
    anchor: Links,
    next_seq: u64,
    linked: usize,
    traversals: usize,
    deferred: Vec<NodeKey>,
    reclaimed: Vec<Rc<dyn Slot<T>>>,
}

impl<T: ?Sized + 'static> Ring<T> {
    pub(crate) fn new(name: Cow<'static, str>, capacity: usize) -> Self {
        Self {
            name,
            nodes: Arena::with_capacity(capacity),
            anchor: Links::default(),
            next_seq: 0,
            linked: 0,
            traversals: 0,
            deferred: Vec::new(),
            reclaimed: Vec::new(),
        }
    }

    /// Runs `op` under a mutable borrow, then drops whatever payloads it
    /// reclaimed after the borrow is released.
    pub(crate) fn update<R>(ring: &RefCell<Self>, op: impl FnOnce(&mut Self) -> R) -> R {
        let (out, reclaimed) = {
            let mut ring = ring.borrow_mut();
            let out = op(&mut ring);
            (out, std::mem::take(&mut ring.reclaimed))
        };
        drop(reclaimed);
        out
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Number of linked handlers.
    pub(crate) fn len(&self) -> usize {
        self.linked
    }

    /// Number of nodes still allocated (linked, handle-held, or awaiting sweep).
    pub(crate) fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// Appends `slot` as the new tail, just before the anchor.
    pub(crate) fn insert(&mut self, slot: Rc<dyn Slot<T>>) -> NodeKey {
        let seq = self.next_seq;
        self.next_seq += 1;

        let kind = slot.kind();
        let prev = self.anchor.prev;
        let key = self
            .nodes
            .insert(Node::new(slot, seq, Links { prev, next: None }));

        match prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(tail) => tail.links.next = Some(key),
            None => self.anchor.next = Some(key),
        }
        self.anchor.prev = Some(key);
        self.linked += 1;

        trace!(signal = %self.name, ?key, seq, kind = %kind, "handler connected");
        key
    }

    /// Unlinks `key` and drops the ring's share. Returns `false` if the node
    /// was not linked (already detached, or stale key).
    pub(crate) fn detach(&mut self, key: NodeKey) -> bool {
        if !self.unlink(key) {
            return false;
        }
        trace!(signal = %self.name, ?key, "handler detached");
        self.collect(key);
        true
    }

    /// Adds one handle share. Returns `false` for a stale key.
    pub(crate) fn acquire(&mut self, key: NodeKey) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.refs += 1;
                true
            }
            None => false,
        }
    }

    /// Drops one handle share, reclaiming the node if it was the last owner.
    pub(crate) fn release_ref(&mut self, key: NodeKey) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.refs = node.refs.saturating_sub(1);
            self.collect(key);
        }
    }

    pub(crate) fn is_linked(&self, key: NodeKey) -> bool {
        self.nodes.get(key).is_some_and(|node| node.linked)
    }

    pub(crate) fn handle_count(&self, key: NodeKey) -> Option<usize> {
        self.nodes.get(key).map(|node| node.refs)
    }

    pub(crate) fn kind(&self, key: NodeKey) -> Option<SlotKind> {
        self.nodes.get(key).map(|node| node.slot.kind())
    }

    /// Detaches every node, walking from the anchor's successor in order.
    /// Returns how many handlers were detached.
    pub(crate) fn teardown(&mut self) -> usize {
        let mut detached = 0;
        while let Some(key) = self.anchor.next {
            if !self.detach(key) {
                // anchor must only ever point at linked nodes
                self.anchor = Links::default();
                self.linked = 0;
                break;
            }
            detached += 1;
        }
        detached
    }

    /// Marks a traversal as started and returns its sequence limit: nodes
    /// with `seq >= limit` were registered after it began.
    pub(crate) fn begin_traversal(&mut self) -> u64 {
        self.traversals += 1;
        self.next_seq
    }

    /// Marks a traversal as finished; the outermost one sweeps deferred nodes.
    pub(crate) fn end_traversal(&mut self) {
        self.traversals = self.traversals.saturating_sub(1);
        if self.traversals > 0 {
            return;
        }
        for key in std::mem::take(&mut self.deferred) {
            self.collect(key);
        }
    }

    pub(crate) fn first(&self) -> Option<NodeKey> {
        self.anchor.next
    }

    /// Successor of `key`. For a detached node this is the successor it had
    /// when it was detached.
    pub(crate) fn successor(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|node| node.links.next)
    }

    pub(crate) fn step(&self, key: NodeKey, limit: u64) -> Step<T> {
        match self.nodes.get(key) {
            Some(node) if node.seq >= limit => Step::Stop,
            Some(node) if node.linked => Step::Invoke(Rc::clone(&node.slot)),
            Some(_) => Step::Skip,
            None => Step::Stop,
        }
    }

    fn unlink(&mut self, key: NodeKey) -> bool {
        let links = match self.nodes.get_mut(key) {
            Some(node) if node.linked => {
                node.linked = false;
                // `links.next` is kept for traversals standing on this node
                node.links
            }
            _ => return false,
        };

        match links.prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(prev) => prev.links.next = links.next,
            None => self.anchor.next = links.next,
        }
        match links.next.and_then(|n| self.nodes.get_mut(n)) {
            Some(next) => next.links.prev = links.prev,
            None => self.anchor.prev = links.prev,
        }
        self.linked -= 1;
        true
    }

    fn collect(&mut self, key: NodeKey) {
        if !self.nodes.get(key).is_some_and(Node::is_orphaned) {
            return;
        }
        if self.traversals > 0 {
            self.deferred.push(key);
            return;
        }
        if let Some(node) = self.nodes.remove(key) {
            trace!(signal = %self.name, ?key, "handler reclaimed");
            self.reclaimed.push(node.slot);
        }
    }
}
