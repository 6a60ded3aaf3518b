use std::io::{self, Write};

use crossterm::{
    queue,
    style::{self, Stylize},
};
use text_rope::Rope;

enum Piece<'a> {
    Node(&'a Rope),
    Text(&'static str),
}

/// Writes the tree shape as `(left + right)`, colouring leaves when `styled`.
pub fn tree<W: Write>(w: &mut W, rope: &Rope, styled: bool) -> io::Result<()> {
    let mut pending = vec![Piece::Node(rope)];

    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(text) if styled => queue!(w, style::PrintStyledContent(text.dark_grey()))?,
            Piece::Text(text) => queue!(w, style::Print(text))?,
            Piece::Node(node) => match (node.left(), node.right()) {
                (Some(left), Some(right)) => {
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(right));
                    pending.push(Piece::Text(" + "));
                    pending.push(Piece::Node(left));
                    pending.push(Piece::Text("("));
                }
                _ => {
                    let leaf = format!("Rope({:?})", node.leaf_text().unwrap_or_default());
                    if styled {
                        queue!(w, style::PrintStyledContent(leaf.green()))?;
                    } else {
                        queue!(w, style::Print(leaf))?;
                    }
                }
            },
        }
    }

    queue!(w, style::Print("\n"))
}

/// The tree followed by its leaf count and depth.
pub fn summary<W: Write>(w: &mut W, rope: &Rope, styled: bool) -> io::Result<()> {
    tree(w, rope, styled)?;
    writeln!(w, "{} leaves, depth {}", rope.leaf_count(), rope.depth())
}

pub fn chunks<W: Write>(w: &mut W, rope: &Rope) -> io::Result<()> {
    for (i, chunk) in rope.chunks().enumerate() {
        writeln!(w, "{:>4}  {:?}", i, chunk)?;
    }
    Ok(())
}
