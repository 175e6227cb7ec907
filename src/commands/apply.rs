use anyhow::{Result, bail};
use tracing::{info, warn};

use super::shared::load_outline;
use crate::cli::ApplyArgs;
use crate::emit::emit_outline;
use crate::model::{ApplyCounts, ApplyPaths, ApplyReport};
use crate::pdf_writer::{LopdfOutlineWriter, default_output_path, refers_to_same_file};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: ApplyArgs) -> Result<()> {
    let started_at = now_utc_string();

    if !args.pdf.is_file() {
        bail!("PDF file not found: {}", args.pdf.display());
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.pdf));
    if refers_to_same_file(&args.pdf, &output_path)? {
        bail!(
            "refusing to overwrite the input PDF in place: {}",
            output_path.display()
        );
    }

    let loaded = load_outline(&args.outline)?;

    if let Some(path) = args.manifest_path.as_deref() {
        write_json_pretty(path, &loaded.manifest())?;
        info!(path = %path.display(), "wrote outline manifest");
    }

    info!(pdf = %args.pdf.display(), output = %output_path.display(), "applying outline");

    let mut writer = LopdfOutlineWriter::open(&args.pdf)?;
    let page_count = writer.page_count();
    let summary = emit_outline(&loaded.outline, &mut writer)?;
    let pages_clamped = writer.clamped_count();
    if pages_clamped > 0 {
        warn!(
            count = pages_clamped,
            page_count,
            "bookmarks pointed past the last page and were clamped"
        );
    }

    let written = writer.finish(&output_path)?;

    let report = ApplyReport {
        manifest_version: 1,
        started_at,
        completed_at: now_utc_string(),
        paths: ApplyPaths {
            input_pdf: args.pdf.display().to_string(),
            output_pdf: written.display().to_string(),
            toc_source: loaded.toc_source.clone(),
        },
        input_sha256: sha256_file(&args.pdf)?,
        output_sha256: sha256_file(&written)?,
        counts: ApplyCounts {
            page_count,
            bookmarks_emitted: summary.emitted,
            root_bookmarks: summary.roots,
            pages_clamped,
            empty_titles: loaded.outline.empty_title_count(),
        },
    };

    if let Some(path) = args.report_path.as_deref() {
        write_json_pretty(path, &report)?;
        info!(path = %path.display(), "wrote apply report");
    }

    info!(
        output = %report.paths.output_pdf,
        bookmarks = report.counts.bookmarks_emitted,
        roots = report.counts.root_bookmarks,
        pages = report.counts.page_count,
        "apply completed"
    );

    Ok(())
}
