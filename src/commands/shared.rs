use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::OutlineArgs;
use crate::model::OutlineManifest;
use crate::outline::{
    Level, LevelPattern, LevelPatterns, Outline, OutlineOptions, PatternSource, build,
};
use crate::util::{decode_text, now_utc_string, read_input_bytes};

pub(super) struct LoadedOutline {
    pub options: OutlineOptions,
    pub outline: Outline,
    pub toc_source: String,
}

impl LoadedOutline {
    pub fn manifest(&self) -> OutlineManifest {
        OutlineManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            toc_source: self.toc_source.clone(),
            page_offset: self.options.page_offset,
            default_level: self.options.default_level,
            patterns: self.options.patterns.clone(),
            record_count: self.outline.len(),
            empty_title_count: self.outline.empty_title_count(),
            records: self.outline.clone(),
        }
    }
}

fn resolve_options(args: &OutlineArgs) -> Result<OutlineOptions> {
    let default_level = Level::try_from(args.default_level)
        .map_err(|value| anyhow::anyhow!("default level must be 0, 1 or 2, got {value}"))?;

    let patterns = LevelPatterns::new(
        resolve_pattern(Level::Chapter, args.level0.as_deref(), args.level0_regex.as_deref())?,
        resolve_pattern(Level::Section, args.level1.as_deref(), args.level1_regex.as_deref())?,
        resolve_pattern(
            Level::Subsection,
            args.level2.as_deref(),
            args.level2_regex.as_deref(),
        )?,
    );
    if Level::ALL
        .into_iter()
        .all(|level| !patterns.get(level).is_set())
    {
        warn!(
            default_level = %default_level,
            "no level patterns set; every bookmark gets the default level"
        );
    }

    Ok(OutlineOptions {
        page_offset: args.offset,
        default_level,
        patterns,
    })
}

fn resolve_pattern(level: Level, example: Option<&str>, regex: Option<&str>) -> Result<LevelPattern> {
    let source = match (regex, example) {
        (Some(regex), _) => Some(PatternSource::Regex(regex.to_string())),
        (None, Some(example)) => Some(PatternSource::Example(example.to_string())),
        (None, None) => None,
    };

    let pattern = LevelPattern::resolve(level, source.as_ref())
        .with_context(|| format!("failed to resolve {} pattern", level.as_str()))?;
    info!(
        level = %level.as_str(),
        pattern = %pattern.as_str().unwrap_or("<unset>"),
        "resolved level pattern"
    );

    Ok(pattern)
}

pub(super) fn load_outline(args: &OutlineArgs) -> Result<LoadedOutline> {
    let options = resolve_options(args)?;

    let bytes = read_input_bytes(&args.toc)?;
    let text = decode_text(&bytes, args.encoding.as_deref())
        .with_context(|| format!("failed to decode {}", args.toc.display()))?;

    let outline = build(text.lines(), &options);
    let toc_source = args.toc.display().to_string();

    info!(
        toc = %toc_source,
        records = outline.len(),
        roots = outline.root_count(),
        page_offset = options.page_offset,
        "built outline"
    );

    let empty_titles = outline.empty_title_count();
    if empty_titles > 0 {
        warn!(
            count = empty_titles,
            "outline contains bookmarks with empty titles; review before applying"
        );
    }

    Ok(LoadedOutline {
        options,
        outline,
        toc_source,
    })
}
