pub(crate) mod args;
pub(crate) mod render;
pub(crate) mod source;

pub(crate) use self::args::{Args, Command};
