use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use text_rope::DEFAULT_MERGE_LIMIT;

/// Build a rope from text chunks and files, then slice, edit or inspect it.
#[derive(Parser, Debug)]
#[command(name = "text-rope", version, about)]
pub struct Args {
    /// Text chunk to load; repeatable, loaded before any files
    #[arg(short, long = "text", value_name = "TEXT")]
    pub texts: Vec<String>,

    /// File to load as one chunk; repeatable, files are read concurrently
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Re-split the loaded text into chunks of at most N chars
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<NonZeroUsize>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the rope's text
    Show,

    /// Print the rope's length in chars
    Len,

    /// Print one char or a slice: `i`, `start:stop` or `start:stop:step`
    Index {
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },

    /// Insert text before a char position and print the result
    Insert { index: usize, text: String },

    /// List the leaf chunks in order
    Chunks,

    /// Print the tree shape
    Tree,

    /// Drop empty leaves and merge small sibling leaves, then print the tree
    Reduce {
        #[arg(long, default_value_t = DEFAULT_MERGE_LIMIT)]
        merge_limit: usize,
    },

    /// Rebuild the tree balanced by leaf count, then print it
    Rebalance,
}
