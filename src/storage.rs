//! Arena storage for sequence nodes
//!
//! Every container owns one [`NodeArena`], a thin wrapper over
//! [`slotmap::SlotMap`]. Nodes refer to each other by [`NodeKey`] instead of
//! by pointer, which makes splicing and merging pure key rewrites and keeps
//! the structure free of `unsafe` and of `Rc<RefCell<_>>` cycles.
//!
//! # Characteristics
//! - Contiguous memory allocation (better cache locality than boxed nodes)
//! - Generational keys detect stale references
//! - Removal is explicit: a node lives until its sequence unlinks it
//!
//! # Moving nodes between arenas
//!
//! Keys are only meaningful inside the arena that issued them. When one
//! sequence absorbs another, [`NodeArena::absorb`] re-inserts the donor's
//! nodes and rewrites their links through a [`KeyMap`].

use crate::traits::Linked;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Key of a node inside a [`NodeArena`]
    pub struct NodeKey;
}

/// Old-key to new-key translation produced by [`NodeArena::absorb`]
pub type KeyMap = SecondaryMap<NodeKey, NodeKey>;

/// Translates an optional link through `map`
#[inline]
pub(crate) fn remap(key: Option<NodeKey>, map: &KeyMap) -> Option<NodeKey> {
    key.and_then(|k| map.get(k).copied())
}

/// SlotMap-backed arena owning the nodes of one container
#[derive(Debug, Clone)]
pub struct NodeArena<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> NodeArena<N> {
    /// Creates an empty arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a node, returning its key
    #[inline]
    pub fn insert(&mut self, node: N) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Removes a node by key, returning it if it existed
    #[inline]
    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        self.nodes.remove(key)
    }

    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.nodes.get_mut(key)
    }

    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Mutable access to two distinct nodes at once
    ///
    /// Returns `None` if the keys are equal or either is absent.
    #[inline]
    pub fn get_pair_mut(&mut self, a: NodeKey, b: NodeKey) -> Option<[&mut N; 2]> {
        self.nodes.get_disjoint_mut([a, b])
    }

    /// Drops every node
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<N: Linked> NodeArena<N> {
    /// Moves every node of `other` into this arena
    ///
    /// All links held by the moved nodes are rewritten to the new keys, so
    /// a chain that was self-contained in `other` stays intact here. The
    /// returned map lets the caller translate its own head/tail keys.
    pub fn absorb(&mut self, other: NodeArena<N>) -> KeyMap {
        let mut map = KeyMap::with_capacity(other.len());
        let mut moved = Vec::with_capacity(other.len());
        for (old, node) in other.nodes {
            let new = self.nodes.insert(node);
            map.insert(old, new);
            moved.push(new);
        }
        for key in moved {
            if let Some(node) = self.nodes.get_mut(key) {
                node.remap_links(&map);
            }
        }
        map
    }
}

impl<N> Index<NodeKey> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }
}

impl<N> IndexMut<NodeKey> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }
}
