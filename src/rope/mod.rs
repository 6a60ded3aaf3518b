mod display;
mod edit;
mod iter;
mod node;
mod slice;

#[cfg(test)]
mod tests;

pub use self::edit::DEFAULT_MERGE_LIMIT;
pub use self::iter::{Chunks, IntoChunks};
pub use self::node::Rope;
pub use self::slice::{Index, Slice};
