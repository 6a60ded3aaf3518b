use std::iter::FusedIterator;
use std::mem;
use std::rc::Rc;

use super::node::{Node, Rope};

/// Leaf chunks of a rope, left to right.
///
/// The traversal keeps its own stack, so any number of `Chunks` can walk the same rope at
/// once and a fresh one can be started at any time.
pub struct Chunks<'a> {
    pending: Vec<&'a Rope>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(rope) = self.pending.pop() {
            match rope.node.as_ref() {
                Node::Leaf { text, .. } => return Some(text.as_str()),
                Node::Internal { left, right, .. } => {
                    self.pending.push(right);
                    self.pending.push(left);
                }
            }
        }

        None
    }
}

impl FusedIterator for Chunks<'_> {}

/// Owned leaf chunks, consuming the rope handle.
///
/// This is the single-pass view: once it has yielded the last chunk it only ever returns
/// `None`, and the handle it was made from is gone. Chunks of nodes no other rope shares
/// are moved out rather than copied.
pub struct IntoChunks {
    pending: Vec<Rope>,
}

impl Iterator for IntoChunks {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(rope) = self.pending.pop() {
            match Rc::try_unwrap(rope.node) {
                Ok(mut node) => match &mut node {
                    Node::Leaf { text, .. } => return Some(mem::take(text)),
                    Node::Internal { left, right, .. } => {
                        self.pending.push(mem::take(right));
                        self.pending.push(mem::take(left));
                    }
                },
                Err(shared) => match shared.as_ref() {
                    Node::Leaf { text, .. } => return Some(text.clone()),
                    Node::Internal { left, right, .. } => {
                        self.pending.push(right.clone());
                        self.pending.push(left.clone());
                    }
                },
            }
        }

        None
    }
}

impl FusedIterator for IntoChunks {}

impl Rope {
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks { pending: vec![self] }
    }

    /// Handles to every leaf, left to right.
    pub(super) fn leaves(&self) -> Vec<Rope> {
        let mut leaves = Vec::new();
        let mut pending = vec![self];

        while let Some(rope) = pending.pop() {
            match rope.node.as_ref() {
                Node::Leaf { .. } => leaves.push(rope.clone()),
                Node::Internal { left, right, .. } => {
                    pending.push(right);
                    pending.push(left);
                }
            }
        }

        leaves
    }
}

impl<'a> IntoIterator for &'a Rope {
    type Item = &'a str;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Chunks<'a> {
        self.chunks()
    }
}

impl IntoIterator for Rope {
    type Item = String;
    type IntoIter = IntoChunks;

    fn into_iter(self) -> IntoChunks {
        IntoChunks { pending: vec![self] }
    }
}
