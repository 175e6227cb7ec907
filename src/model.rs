use serde::Serialize;

use crate::outline::{Level, LevelPatterns, Outline};

#[derive(Debug, Clone, Serialize)]
pub struct OutlineManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub toc_source: String,
    pub page_offset: i64,
    pub default_level: Level,
    pub patterns: LevelPatterns,
    pub record_count: usize,
    pub empty_title_count: usize,
    pub records: Outline,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyPaths {
    pub input_pdf: String,
    pub output_pdf: String,
    pub toc_source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyCounts {
    pub page_count: usize,
    pub bookmarks_emitted: usize,
    pub root_bookmarks: usize,
    pub pages_clamped: usize,
    pub empty_titles: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub manifest_version: u32,
    pub started_at: String,
    pub completed_at: String,
    pub paths: ApplyPaths,
    pub input_sha256: String,
    pub output_sha256: String,
    pub counts: ApplyCounts,
}
