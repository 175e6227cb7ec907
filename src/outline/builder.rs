use serde::Serialize;

use super::level::{Level, LevelPatterns, classify};
use super::line::parse_line;

#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    pub page_offset: i64,
    pub default_level: Level,
    pub patterns: LevelPatterns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRecord {
    pub index: usize,
    pub title: String,
    /// Zero-based page index after offset and monotonic correction.
    pub page_number: u32,
    pub level: Level,
    pub parent: Option<usize>,
}

/// Records keyed by their position in the input; `records[i].index == i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Outline {
    records: Vec<BookmarkRecord>,
}

impl Outline {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BookmarkRecord> {
        self.records.iter()
    }

    pub fn empty_title_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.title.is_empty())
            .count()
    }

    pub fn root_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.parent.is_none())
            .count()
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a BookmarkRecord;
    type IntoIter = std::slice::Iter<'a, BookmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Ancestors {
    chapter: Option<usize>,
    section: Option<usize>,
}

impl Ancestors {
    fn attach(&mut self, level: Level, index: usize) -> Option<usize> {
        match level {
            Level::Chapter => {
                self.chapter = Some(index);
                None
            }
            Level::Section => {
                self.section = Some(index);
                self.chapter
            }
            Level::Subsection => self.section,
        }
    }
}

pub fn build<I, S>(lines: I, options: &OutlineOptions) -> Outline
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ancestors = Ancestors::default();
    let mut running_max_page = 0_u32;
    let mut records = Vec::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let parsed = parse_line(raw.as_ref());

        let candidate_page = parsed
            .page_number
            .saturating_add(options.page_offset)
            .saturating_sub(1);
        let page_number = clamp_page(candidate_page).max(running_max_page);
        running_max_page = page_number;

        let level = classify(&parsed.title, &options.patterns, options.default_level);
        let parent = ancestors.attach(level, index);

        records.push(BookmarkRecord {
            index,
            title: parsed.title,
            page_number,
            level,
            parent,
        });
    }

    Outline { records }
}

fn clamp_page(candidate: i64) -> u32 {
    u32::try_from(candidate.max(0)).unwrap_or(u32::MAX)
}
