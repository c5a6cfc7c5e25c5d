//! In-memory adjacency index over a user's directory tree.
//!
//! Built fresh from a metadata store snapshot before every operation
//! that depends on tree shape; never held across store round-trips.

use std::collections::HashMap;

use uuid::Uuid;

/// Adjacency map from parent id to ordered child ids.
///
/// Enumeration is a pre-order flattening driven by an explicit work
/// stack, so arbitrarily deep trees cannot exhaust the call stack.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl TreeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(child, parent)` edges, preserving edge order.
    pub fn from_edges(edges: impl IntoIterator<Item = (Uuid, Uuid)>) -> Self {
        let mut index = Self::new();
        for (child, parent) in edges {
            index.add_edge(parent, child);
        }
        index
    }

    /// Record `child` under `parent`.
    pub fn add_edge(&mut self, parent: Uuid, child: Uuid) {
        self.children.entry(parent).or_default().push(child);
    }

    /// Direct children of `parent`, in insertion order.
    pub fn children(&self, parent: &Uuid) -> &[Uuid] {
        self.children.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of recorded parent entries.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the index holds no edges.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order flattening of all descendants of `roots`.
    ///
    /// For each root, emits the root's children, then each child's own
    /// descendants, depth-first, left-to-right. The roots themselves are
    /// not included; callers union them in when they need the closed set.
    pub fn enumerate(&self, roots: &[Uuid]) -> Vec<Uuid> {
        let mut out = Vec::new();
        let mut stack: Vec<Uuid> = Vec::new();

        for root in roots {
            for child in self.children(root).iter().rev() {
                stack.push(*child);
            }
            while let Some(id) = stack.pop() {
                out.push(id);
                for child in self.children(&id).iter().rev() {
                    stack.push(*child);
                }
            }
        }

        out
    }

    /// Whether `candidate` lies inside the subtree rooted at `root`
    /// (strictly below it; a node is not inside its own subtree).
    pub fn is_inside(&self, candidate: Uuid, root: Uuid) -> bool {
        let mut stack: Vec<Uuid> = self.children(&root).to_vec();
        while let Some(id) = stack.pop() {
            if id == candidate {
                return true;
            }
            stack.extend_from_slice(self.children(&id));
        }
        false
    }
}
