use std::fmt;

use super::node::{Node, Rope};

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

enum Piece<'a> {
    Node(&'a Rope),
    Text(&'static str),
}

/// Shows the tree shape: leaves as `Rope("chunk")`, internal nodes as `(left + right)`.
impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(rope) => match rope.node.as_ref() {
                    Node::Leaf { text, .. } => write!(f, "Rope({:?})", text)?,
                    Node::Internal { left, right, .. } => {
                        f.write_str("(")?;
                        pending.push(Piece::Text(")"));
                        pending.push(Piece::Node(right));
                        pending.push(Piece::Text(" + "));
                        pending.push(Piece::Node(left));
                    }
                },
            }
        }

        Ok(())
    }
}
