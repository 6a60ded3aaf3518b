use std::mem;
use std::ops::Add;
use std::rc::Rc;

use tracing::trace;

use crate::error::{Result, RopeError};

pub(super) enum Node {
    Leaf { text: String, len: usize },
    Internal { left: Rope, right: Rope, len: usize },
}

impl Node {
    fn new_leaf(text: String) -> Rc<Self> {
        let len = text.chars().count();
        Rc::new(Node::Leaf { text, len })
    }

    fn new_internal(left: Rope, right: Rope) -> Rc<Self> {
        Rc::new(Node::Internal {
            len: left.len() + right.len(),
            left,
            right,
        })
    }

    fn len(&self) -> usize {
        match self {
            Node::Leaf { len, .. } | Node::Internal { len, .. } => *len,
        }
    }
}

thread_local! {
    static DETACHED: Rc<Node> = Rc::new(Node::Leaf { text: String::new(), len: 0 });
}

// Unlinks uniquely owned internal children onto a heap stack so that dropping a
// long concatenation spine does not recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let Node::Internal { left, right, .. } = self else {
            return;
        };

        if !left.is_unique_internal() && !right.is_unique_internal() {
            return;
        }

        let mut pending = vec![left.detach(), right.detach()];
        while let Some(rope) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(rope.node) {
                if let Node::Internal { left, right, .. } = &mut node {
                    pending.push(left.detach());
                    pending.push(right.detach());
                }
            }
        }
    }
}

/// A persistent rope over `char`s.
///
/// Cloning a `Rope` clones a handle, not the text: subtrees are shared between every rope
/// built from them, and neither text nor shape ever changes after construction. Handles
/// are reference counted without atomics, so a rope stays on the thread that built it.
#[derive(Clone)]
pub struct Rope {
    pub(super) node: Rc<Node>,
}

impl Rope {
    pub fn new(text: &str) -> Self {
        Self::from(text.to_string())
    }

    /// Builds a rope balanced by chunk count: the first `ceil(n / 2)` chunks go left.
    pub fn from_chunks<S: AsRef<str>>(chunks: &[S]) -> Self {
        trace!(chunks = chunks.len(), "building rope from chunks");

        let leaves = chunks.iter().map(|chunk| Rope::new(chunk.as_ref())).collect::<Vec<_>>();
        Self::from_ropes(&leaves)
    }

    /// Builds a rope from raw bytes, failing if they are not UTF-8 text.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self> {
        String::from_utf8(bytes)
            .map(Rope::from)
            .map_err(|_| RopeError::InvalidConstructionInput)
    }

    /// Builds a balanced rope from raw byte chunks, failing if any chunk is not UTF-8 text.
    pub fn from_utf8_chunks(chunks: Vec<Vec<u8>>) -> Result<Self> {
        trace!(chunks = chunks.len(), "building rope from byte chunks");

        let leaves = chunks.into_iter().map(Rope::from_utf8).collect::<Result<Vec<_>>>()?;
        Ok(Self::from_ropes(&leaves))
    }

    /// Joins existing ropes into one tree balanced by count, sharing every operand.
    pub fn from_ropes(ropes: &[Rope]) -> Self {
        match ropes {
            [] => Rope::new(""),
            [rope] => rope.clone(),
            _ => {
                let (left, right) = ropes.split_at(ropes.len().div_ceil(2));
                Rope::concat(Self::from_ropes(left), Self::from_ropes(right))
            }
        }
    }

    /// Wraps two ropes in a new internal node. Neither operand is copied or modified.
    pub fn concat(left: Rope, right: Rope) -> Self {
        Self {
            node: Node::new_internal(left, right),
        }
    }

    /// Length in `char`s, cached at construction.
    pub fn len(&self) -> usize {
        self.node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_leaf(&self) -> bool {
        matches!(*self.node, Node::Leaf { .. })
    }

    pub fn left(&self) -> Option<&Rope> {
        match self.node.as_ref() {
            Node::Internal { left, .. } => Some(left),
            Node::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Rope> {
        match self.node.as_ref() {
            Node::Internal { right, .. } => Some(right),
            Node::Leaf { .. } => None,
        }
    }

    /// The chunk held by a leaf, or `None` for an internal node.
    pub fn leaf_text(&self) -> Option<&str> {
        match self.node.as_ref() {
            Node::Leaf { text, .. } => Some(text.as_str()),
            Node::Internal { .. } => None,
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];

        while let Some((rope, depth)) = pending.pop() {
            match rope.node.as_ref() {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    pending.push((left, depth + 1));
                    pending.push((right, depth + 1));
                }
            }
        }

        deepest
    }

    pub fn leaf_count(&self) -> usize {
        self.chunks().count()
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Rope) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    fn is_unique_internal(&self) -> bool {
        Rc::strong_count(&self.node) == 1 && !self.is_leaf()
    }

    fn detach(&mut self) -> Rope {
        let placeholder = DETACHED
            .try_with(Rc::clone)
            .unwrap_or_else(|_| Node::new_leaf(String::new()));

        mem::replace(self, Rope { node: placeholder })
    }
}

impl Default for Rope {
    fn default() -> Self {
        Rope::new("")
    }
}

impl From<String> for Rope {
    fn from(text: String) -> Self {
        Self {
            node: Node::new_leaf(text),
        }
    }
}

impl From<&str> for Rope {
    fn from(text: &str) -> Self {
        Rope::new(text)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Rope {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let leaves = iter.into_iter().map(|chunk| Rope::new(chunk.as_ref())).collect::<Vec<_>>();
        Self::from_ropes(&leaves)
    }
}

/// Structural equality: two internal nodes are equal when their children are pairwise
/// equal, two leaves when their chunks are. A leaf never equals an internal node, even
/// when both spell the same text.
impl PartialEq for Rope {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((a, b)) = pending.pop() {
            if a.ptr_eq(b) {
                continue;
            }

            match (a.node.as_ref(), b.node.as_ref()) {
                (Node::Leaf { text: a, .. }, Node::Leaf { text: b, .. }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Node::Internal { left: a_left, right: a_right, len: a_len },
                    Node::Internal { left: b_left, right: b_right, len: b_len },
                ) => {
                    if a_len != b_len {
                        return false;
                    }
                    pending.push((a_right, b_right));
                    pending.push((a_left, b_left));
                }
                _ => return false,
            }
        }

        true
    }
}

impl Eq for Rope {}

impl Add for Rope {
    type Output = Rope;

    fn add(self, other: Rope) -> Rope {
        Rope::concat(self, other)
    }
}

impl Add<&Rope> for &Rope {
    type Output = Rope;

    fn add(self, other: &Rope) -> Rope {
        Rope::concat(self.clone(), other.clone())
    }
}
