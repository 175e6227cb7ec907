use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use super::shared::load_outline;
use crate::cli::PreviewArgs;
use crate::outline::Outline;
use crate::util::write_json_pretty;

pub fn run(args: PreviewArgs) -> Result<()> {
    let loaded = load_outline(&args.outline)?;
    let manifest = loaded.manifest();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &manifest)
            .context("failed to serialize outline manifest")?;
        writeln!(out).context("failed to write to stdout")?;
    } else {
        write_table(&mut out, &loaded.outline).context("failed to write to stdout")?;
    }

    if let Some(path) = args.manifest_path.as_deref() {
        write_json_pretty(path, &manifest)?;
        info!(path = %path.display(), "wrote outline manifest");
    }

    Ok(())
}

fn write_table<W: Write>(out: &mut W, outline: &Outline) -> io::Result<()> {
    if outline.is_empty() {
        writeln!(out, "No bookmarks.")?;
        return Ok(());
    }

    writeln!(out, "level\tpage\ttitle")?;
    for record in outline {
        let indent = "  ".repeat(record.level.depth());
        writeln!(
            out,
            "{}\t{}\t{}{}",
            record.level,
            u64::from(record.page_number) + 1,
            indent,
            record.title
        )?;
    }

    Ok(())
}
