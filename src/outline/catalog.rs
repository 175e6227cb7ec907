use serde::Serialize;

use super::level::Level;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogEntry {
    pub level: Level,
    pub example: &'static str,
    pub pattern: &'static str,
}

const fn entry(level: Level, example: &'static str, pattern: &'static str) -> CatalogEntry {
    CatalogEntry {
        level,
        example,
        pattern,
    }
}

pub static CATALOG: &[CatalogEntry] = &[
    entry(Level::Chapter, "1", r"\d+"),
    entry(Level::Chapter, "I", r"[IVX]+"),
    entry(Level::Chapter, "一", "[一二三四五六七八九十百千]+"),
    entry(Level::Chapter, "第1章", r"第\d+章"),
    entry(Level::Chapter, "第I章", "第[IVX]+章"),
    entry(Level::Chapter, "第一章", "第[一二三四五六七八九十百千]+章"),
    entry(Level::Section, "1", r"\d+"),
    entry(Level::Section, "1.1", r"\d+\.\d+"),
    entry(Level::Section, "第1节", r"第\d+节"),
    entry(Level::Section, "第一节", "第[一二三四五六七八九十百千]+节"),
    entry(Level::Subsection, "1.1", r"\d+\.\d+"),
    entry(Level::Subsection, "1.1.1", r"\d+\.\d+\.\d+"),
];

pub fn lookup(level: Level, example: &str) -> Option<&'static str> {
    examples(level)
        .find(|entry| entry.example == example)
        .map(|entry| entry.pattern)
}

pub fn examples(level: Level) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |entry| entry.level == level)
}
