//! A persistent rope: a binary tree of text chunks that concatenates in O(1) and
//! supports integer and stepped-slice indexing without flattening the text.
//!
//! ```
//! use text_rope::{Rope, Slice};
//!
//! let rope = Rope::from_chunks(&["hello", " ", "world"]);
//! assert_eq!(rope.len(), 11);
//! assert_eq!(rope.slice(Slice::from(0..5)).unwrap().to_string(), "hello");
//! assert_eq!(rope.slice(Slice::reversed()).unwrap().to_string(), "dlrow olleh");
//! ```
//!
//! Lengths and indices count `char`s, not bytes.

pub mod error;
pub mod rope;

pub use crate::error::{Result, RopeError};
pub use crate::rope::{Chunks, Index, IntoChunks, Rope, Slice, DEFAULT_MERGE_LIMIT};
