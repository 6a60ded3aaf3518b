use std::num::NonZeroUsize;
use std::path::PathBuf;

use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use text_rope::Rope;
use tracing::debug;

pub struct Source {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Collects `--text` chunks followed by the contents of every file, in argument order.
pub async fn read_all(texts: &[String], files: &[PathBuf]) -> Result<Vec<Source>, Report> {
    let reads = files
        .iter()
        .cloned()
        .map(|path| {
            tokio::spawn(async move {
                let bytes = tokio::fs::read(&path)
                    .await
                    .wrap_err_with(|| format!("Error reading file '{}'", path.display()))?;
                Ok::<_, Report>(Source { name: path.display().to_string(), bytes })
            })
        })
        .collect::<Vec<_>>();

    let mut sources = texts
        .iter()
        .enumerate()
        .map(|(i, text)| Source { name: format!("--text #{}", i + 1), bytes: text.clone().into_bytes() })
        .collect::<Vec<_>>();

    for read in reads {
        let source = read.await??;
        debug!(name = %source.name, bytes = source.bytes.len(), "loaded source");
        sources.push(source);
    }

    if sources.is_empty() {
        return Err(eyre!("No input specified, pass --text or --file"));
    }

    Ok(sources)
}

/// One leaf per source, balanced by count, or fixed-size chunks when `chunk_size` is set.
pub fn build(sources: Vec<Source>, chunk_size: Option<NonZeroUsize>) -> Result<Rope, Report> {
    let leaves = sources
        .into_iter()
        .map(|Source { name, bytes }| {
            Rope::from_utf8(bytes).wrap_err_with(|| format!("Error loading '{}'", name))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rope = Rope::from_ropes(&leaves);
    Ok(match chunk_size {
        Some(size) => rechunk(&rope, size.get()),
        None => rope,
    })
}

fn rechunk(rope: &Rope, size: usize) -> Rope {
    let chars = rope.to_string().chars().collect::<Vec<_>>();
    let chunks = chars.chunks(size).map(|chunk| chunk.iter().collect::<String>()).collect::<Vec<_>>();

    debug!(size, chunks = chunks.len(), "re-split rope");
    Rope::from_chunks(&chunks)
}
