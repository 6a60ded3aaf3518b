use std::io;

use clap::Parser;
use color_eyre::Report;
use crossterm::tty::IsTty;
use text_rope::Index;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{render, source, Args, Command};

fn run<W>(w: &mut W, args: Args, styled: bool) -> Result<(), Report>
where
    W: io::Write,
{
    let runtime = Runtime::new()?;
    let sources = runtime.block_on(source::read_all(&args.texts, &args.files))?;

    let mut rope = source::build(sources, args.chunk_size)?;
    info!(len = rope.len(), leaves = rope.leaf_count(), depth = rope.depth(), "rope loaded");

    match args.command {
        Command::Show => writeln!(w, "{}", rope)?,
        Command::Len => writeln!(w, "{}", rope.len())?,
        Command::Index { expr } => {
            let index = expr.parse::<Index>()?;
            writeln!(w, "{}", rope.index(index)?)?;
        }
        Command::Insert { index, text } => {
            rope.insert(index, &text)?;
            writeln!(w, "{}", rope)?;
        }
        Command::Chunks => render::chunks(w, &rope)?,
        Command::Tree => render::tree(w, &rope, styled)?,
        Command::Reduce { merge_limit } => render::summary(w, &rope.reduce_with_limit(merge_limit), styled)?,
        Command::Rebalance => render::summary(w, &rope.rebalance(), styled)?,
    }

    w.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.verbose);

    let mut stdout = io::stdout();
    let styled = stdout.is_tty();
    run(&mut stdout, args, styled)
}
