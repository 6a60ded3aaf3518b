use tracing::debug;

use crate::error::{Result, RopeError};

use super::node::{Node, Rope};

/// Largest combined leaf, in `char`s, that [`Rope::reduce`] will merge two sibling leaves into.
pub const DEFAULT_MERGE_LIMIT: usize = 256;

enum Side {
    Left,
    Right,
}

enum Descent {
    Into(Rope, Rope, Side),
    Done(Rope),
}

enum Visit {
    Enter(Rope),
    Exit(Rope),
}

impl Rope {
    /// Inserts `text` before the `char` at `index`; `index == len()` appends.
    ///
    /// Only the nodes on the path to `index` are rebuilt. The leaf containing `index` is
    /// split in two around the new text, unless `index` falls on a node boundary, where the
    /// text is attached as a new sibling instead. Other ropes sharing the old nodes are
    /// untouched.
    pub fn insert(&mut self, index: usize, text: &str) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(RopeError::IndexOutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len,
            });
        }

        if text.is_empty() {
            return Ok(());
        }

        debug!(index, len, "inserting into rope");

        let inserted = Rope::new(text);
        let mut path = Vec::new();
        let mut rope = self.clone();
        let mut offset = index;

        let mut rebuilt = loop {
            let descent = match rope.node.as_ref() {
                Node::Internal { left, right, .. } => {
                    let split = left.len();
                    if offset < split {
                        Descent::Into(left.clone(), right.clone(), Side::Left)
                    } else if offset == split && offset > 0 {
                        Descent::Done(left.clone() + (inserted.clone() + right.clone()))
                    } else {
                        offset -= split;
                        Descent::Into(right.clone(), left.clone(), Side::Right)
                    }
                }
                Node::Leaf { text: chunk, len } => {
                    if offset == 0 {
                        Descent::Done(inserted.clone() + rope.clone())
                    } else if offset == *len {
                        Descent::Done(rope.clone() + inserted.clone())
                    } else {
                        let at = chunk.char_indices().nth(offset).map_or(chunk.len(), |(at, _)| at);
                        let head = Rope::new(&chunk[..at]);
                        let tail = Rope::new(&chunk[at..]);
                        Descent::Done((head + inserted.clone()) + tail)
                    }
                }
            };

            match descent {
                Descent::Into(next, sibling, side) => {
                    path.push((sibling, side));
                    rope = next;
                }
                Descent::Done(rebuilt) => break rebuilt,
            }
        };

        while let Some((sibling, side)) = path.pop() {
            rebuilt = match side {
                Side::Left => rebuilt + sibling,
                Side::Right => sibling + rebuilt,
            };
        }

        *self = rebuilt;
        Ok(())
    }

    /// [`Rope::reduce_with_limit`] with [`DEFAULT_MERGE_LIMIT`].
    pub fn reduce(&self) -> Rope {
        self.reduce_with_limit(DEFAULT_MERGE_LIMIT)
    }

    /// Removes redundant internal nodes: a node with an empty leaf child is replaced by its
    /// other child, and a node whose children are both leaves becomes one leaf when their
    /// combined length is at most `limit`.
    ///
    /// Text and length are preserved, subtrees that need no change are shared with `self`,
    /// and reducing a reduced rope returns it unchanged.
    pub fn reduce_with_limit(&self, limit: usize) -> Rope {
        debug!(limit, leaves = self.leaf_count(), "reducing rope");

        let mut visits = vec![Visit::Enter(self.clone())];
        let mut reduced: Vec<Rope> = Vec::new();

        while let Some(visit) = visits.pop() {
            match visit {
                Visit::Enter(rope) => match rope.node.as_ref() {
                    Node::Leaf { .. } => reduced.push(rope.clone()),
                    Node::Internal { left, right, .. } => {
                        visits.push(Visit::Exit(rope.clone()));
                        visits.push(Visit::Enter(right.clone()));
                        visits.push(Visit::Enter(left.clone()));
                    }
                },
                Visit::Exit(rope) => {
                    let (Some(right), Some(left)) = (reduced.pop(), reduced.pop()) else {
                        unreachable!("both children are reduced before their parent");
                    };
                    reduced.push(collapse(rope, left, right, limit));
                }
            }
        }

        reduced.pop().unwrap_or_else(|| self.clone())
    }

    /// Rebuilds the rope balanced by leaf count over its current leaves. No text is copied.
    pub fn rebalance(&self) -> Rope {
        let leaves = self.leaves();
        debug!(leaves = leaves.len(), depth = self.depth(), "rebalancing rope");

        Rope::from_ropes(&leaves)
    }
}

fn collapse(original: Rope, left: Rope, right: Rope, limit: usize) -> Rope {
    if left.is_leaf() && left.is_empty() {
        return right;
    }
    if right.is_leaf() && right.is_empty() {
        return left;
    }

    if let (Some(head), Some(tail)) = (left.leaf_text(), right.leaf_text()) {
        if left.len() + right.len() <= limit {
            return Rope::from(format!("{head}{tail}"));
        }
    }

    let unchanged = original.left().is_some_and(|old| old.ptr_eq(&left))
        && original.right().is_some_and(|old| old.ptr_eq(&right));

    if unchanged {
        original
    } else {
        left + right
    }
}
