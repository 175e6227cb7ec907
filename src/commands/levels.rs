use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::LevelsArgs;
use crate::outline::Level;
use crate::outline::catalog::{self, CATALOG};

pub fn run(args: LevelsArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, CATALOG).context("failed to serialize catalog")?;
        writeln!(out).context("failed to write to stdout")?;
        return Ok(());
    }

    write_catalog(&mut out).context("failed to write to stdout")
}

fn write_catalog<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "level\texample\tpattern")?;
    for level in Level::ALL {
        for entry in catalog::examples(level) {
            writeln!(out, "{}\t{}\t{}", level, entry.example, entry.pattern)?;
        }
    }
    Ok(())
}
