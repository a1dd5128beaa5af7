//! Deduplication of small green nodes and tokens.
//!
//! A parser that builds through a `NodeCache` gets the same allocation back
//! for repeated leaves such as `,` or a common identifier, and for small nodes
//! built from those shared children. Nodes are keyed by kind and the
//! addresses of their slots, so a hit needs its children to be shared
//! already; interning bottom-up gives that for free.

use std::hash::{BuildHasher as _, BuildHasherDefault, Hash};

use hashbrown::HashTable;
use parking_lot::Mutex;
use rustc_hash::FxHasher;
use tracing::trace;

use crate::{GreenNode, GreenSlot, GreenToken, SyntaxKind, factory};

const DEFAULT_MAX_INTERNED_SLOTS: usize = 3;

#[derive(Debug)]
pub struct NodeCache {
    inner: Mutex<CacheInner>,
    max_interned_slots: usize,
}

#[derive(Debug, Default)]
struct CacheInner {
    nodes: HashTable<GreenNode>,
    tokens: HashTable<GreenToken>,
    stats: CacheStats,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub nodes: usize,
    pub tokens: usize,
}

impl Default for NodeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeCache {
    pub fn new() -> Self {
        Self::with_max_interned_slots(DEFAULT_MAX_INTERNED_SLOTS)
    }

    /// Nodes with more slots than `max_interned_slots` are built but never
    /// shared.
    pub fn with_max_interned_slots(max_interned_slots: usize) -> Self {
        Self { inner: Mutex::default(), max_interned_slots }
    }

    /// Builds a node through the factory, or returns a previously built node
    /// of the same kind over the same slot allocations.
    #[track_caller]
    pub fn node(&self, kind: SyntaxKind, slots: Vec<GreenSlot>) -> GreenNode {
        if slots.len() > self.max_interned_slots {
            return factory::create_node(kind, slots);
        }

        let hash = node_hash(kind, slots.iter());
        let mut inner = self.inner.lock();
        let found = inner.nodes.find(hash, |node| {
            node.kind() == kind
                && node.slot_count() == slots.len()
                && node.slots().zip(&slots).all(|(a, b)| a.ptr_eq(b))
        });

        if let Some(node) = found {
            let node = node.clone();
            inner.stats.hits += 1;
            trace!(?kind, "node cache hit");
            return node;
        }

        let node = factory::create_node(kind, slots);
        inner.stats.misses += 1;
        inner.nodes.insert_unique(hash, node.clone(), |node| node_hash(node.kind(), node.slots()));
        node
    }

    /// Returns a shared token with this kind and text.
    #[track_caller]
    pub fn token(&self, kind: SyntaxKind, text: &str) -> GreenToken {
        let hash = hash_one(&(kind, text));
        let mut inner = self.inner.lock();
        let found = inner.tokens.find(hash, |token| token.kind() == kind && token.text() == text);

        if let Some(token) = found {
            let token = token.clone();
            inner.stats.hits += 1;
            trace!(?kind, text, "token cache hit");
            return token;
        }

        let token = factory::create_green_token(kind, text);
        inner.stats.misses += 1;
        inner.tokens.insert_unique(hash, token.clone(), |token| {
            hash_one(&(token.kind(), token.text()))
        });
        token
    }

    /// Drops every interned value so that a long-lived cache stops pinning
    /// the trees built through it. Counters are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.nodes.clear();
        inner.tokens.clear();
        trace!(hits = inner.stats.hits, misses = inner.stats.misses, "node cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats { nodes: inner.nodes.len(), tokens: inner.tokens.len(), ..inner.stats }
    }
}

fn node_hash<'a>(kind: SyntaxKind, slots: impl Iterator<Item = &'a GreenSlot>) -> u64 {
    let addresses: Vec<usize> = slots.map(GreenSlot::addr).collect();
    hash_one(&(kind, addresses))
}

fn hash_one<T: Hash>(t: &T) -> u64 {
    BuildHasherDefault::<FxHasher>::default().hash_one(t)
}
