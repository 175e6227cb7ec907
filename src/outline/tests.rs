use super::level::classify;
use super::*;

fn patterns(level0: &str, level1: &str, level2: &str) -> LevelPatterns {
    LevelPatterns::new(
        LevelPattern::compile(Level::Chapter, level0).expect("level0 pattern should compile"),
        LevelPattern::compile(Level::Section, level1).expect("level1 pattern should compile"),
        LevelPattern::compile(Level::Subsection, level2).expect("level2 pattern should compile"),
    )
}

fn numbered_options() -> OutlineOptions {
    OutlineOptions {
        page_offset: 0,
        default_level: Level::Chapter,
        patterns: patterns(r"\d+", r"\d+\.\d+", r"\d+\.\d+\.\d+"),
    }
}

fn summary(outline: &Outline) -> Vec<(&str, u32, Option<usize>)> {
    outline
        .iter()
        .map(|record| (record.title.as_str(), record.page_number, record.parent))
        .collect()
}

#[test]
fn build_links_chapter_section_and_subsection() {
    let options = OutlineOptions {
        page_offset: 0,
        default_level: Level::Chapter,
        patterns: patterns(r"Chapter \d+", r"Section \d+\.\d+", r"Sub \d+\.\d+\.\d+"),
    };

    let outline = build(["Chapter 1 1", "Section 1.1 3", "Sub 1.1.1 5"], &options);

    assert_eq!(
        summary(&outline),
        vec![
            ("Chapter 1", 0, None),
            ("Section 1.1", 2, Some(0)),
            ("Sub 1.1.1", 4, Some(1)),
        ]
    );
    assert_eq!(
        outline.iter().map(|record| record.level).collect::<Vec<_>>(),
        vec![Level::Chapter, Level::Section, Level::Subsection]
    );
}

#[test]
fn parents_follow_most_recent_ancestor() {
    let lines = [
        "1 Getting Started 1",
        "1.1 Install 2",
        "1.1.1 Linux 3",
        "1.1.2 macOS 4",
        "1.2 Hello 5",
        "1.2.1 Compile 6",
        "2 Basics 10",
        "2.1 Variables 11",
    ];

    let outline = build(lines, &numbered_options());

    let parents = outline
        .iter()
        .map(|record| record.parent)
        .collect::<Vec<_>>();
    assert_eq!(
        parents,
        vec![None, Some(0), Some(1), Some(1), Some(0), Some(4), None, Some(6)]
    );
}

#[test]
fn subsection_after_new_chapter_keeps_previous_section() {
    let outline = build(["1 A 1", "1.1 B 2", "2 C 3", "2.1.1 D 4"], &numbered_options());

    assert_eq!(outline.iter().nth(3).and_then(|record| record.parent), Some(1));
}

#[test]
fn subsection_before_any_section_is_attached_at_root() {
    let outline = build(["1.1.1 Orphan 3", "1.1 Section 4"], &numbered_options());

    assert_eq!(outline.iter().next().map(|record| record.level), Some(Level::Subsection));
    assert_eq!(outline.iter().next().and_then(|record| record.parent), None);
    assert_eq!(outline.iter().nth(1).and_then(|record| record.parent), None);
}

#[test]
fn page_offset_is_applied_to_each_line() {
    let options = OutlineOptions {
        page_offset: 5,
        ..OutlineOptions::default()
    };

    let outline = build(["Preface 1", "Intro 2"], &options);

    assert_eq!(summary(&outline), vec![("Preface", 5, None), ("Intro", 6, None)]);
}

#[test]
fn negative_offset_never_produces_negative_pages() {
    let options = OutlineOptions {
        page_offset: -10,
        ..OutlineOptions::default()
    };

    let outline = build(["Cover 1", "Body 15"], &options);

    assert_eq!(summary(&outline), vec![("Cover", 0, None), ("Body", 4, None)]);
}

#[test]
fn out_of_order_pages_are_held_at_running_maximum() {
    let outline = build(["A 11", "B 4", "C", "D 12"], &OutlineOptions::default());

    let pages = outline
        .iter()
        .map(|record| record.page_number)
        .collect::<Vec<_>>();
    assert_eq!(pages, vec![10, 10, 10, 11]);
}

#[test]
fn empty_input_yields_empty_outline() {
    let outline = build(Vec::<String>::new(), &numbered_options());
    assert!(outline.is_empty());
    assert_eq!(outline.len(), 0);
}

#[test]
fn blank_and_digit_only_lines_become_records() {
    let outline = build(["Intro 1", "", "12"], &OutlineOptions::default());

    assert_eq!(
        summary(&outline),
        vec![("Intro", 0, None), ("", 0, None), ("", 11, None)]
    );
    assert_eq!(outline.empty_title_count(), 2);
}

#[test]
fn unmatched_titles_use_default_level() {
    let options = OutlineOptions {
        default_level: Level::Section,
        ..numbered_options()
    };

    let outline = build(["1 Chapter 1", "Exercises 3", "2 Chapter 5"], &options);

    assert_eq!(outline.iter().nth(1).map(|record| record.level), Some(Level::Section));
    assert_eq!(outline.iter().nth(1).and_then(|record| record.parent), Some(0));
    assert_eq!(outline.root_count(), 2);
}

#[test]
fn outline_invariants_hold_for_noisy_input() {
    let lines = [
        "",
        "  1.1.1 early 9",
        "Preface iii",
        "1 Start -2",
        "1.1 Next 40",
        "junk 3",
        "1.1.1 deep 41",
        "2",
        "2 Again 20",
        "2.1 Tail 42",
    ];
    let options = OutlineOptions {
        page_offset: 3,
        default_level: Level::Subsection,
        ..numbered_options()
    };

    let outline = build(lines, &options);

    assert_eq!(outline.len(), lines.len());
    for (position, record) in outline.iter().enumerate() {
        assert_eq!(record.index, position);
        assert_eq!(record.title, record.title.trim());
        if let Some(parent) = record.parent {
            assert!(parent < record.index);
        }
    }
    for pair in outline.iter().collect::<Vec<_>>().windows(2) {
        assert!(pair[0].page_number <= pair[1].page_number);
    }
}

#[test]
fn classify_prefers_deepest_matching_level() {
    let patterns = patterns(r"\d+", r"\d+\.\d+", r"\d+\.\d+\.\d+");

    assert_eq!(classify("1.2.3 Deep", &patterns, Level::Chapter), Level::Subsection);
    assert_eq!(classify("1.2 Mid", &patterns, Level::Chapter), Level::Section);
    assert_eq!(classify("7 Top", &patterns, Level::Chapter), Level::Chapter);
    assert_eq!(classify("Index", &patterns, Level::Section), Level::Section);
}

#[test]
fn classify_matches_at_start_only() {
    let patterns = patterns(r"Chapter \d+", "", "");

    assert_eq!(
        classify("Intro to Chapter 3", &patterns, Level::Subsection),
        Level::Subsection
    );
    assert_eq!(
        classify("Chapter 3 and more", &patterns, Level::Subsection),
        Level::Chapter
    );
}

#[test]
fn anchored_alternation_is_grouped() {
    let patterns = patterns("Part|Book", "", "");

    assert_eq!(classify("Book One", &patterns, Level::Section), Level::Chapter);
    assert_eq!(classify("The Book", &patterns, Level::Section), Level::Section);
}

#[test]
fn unset_patterns_never_match() {
    let patterns = LevelPatterns::default();

    assert!(!patterns.get(Level::Chapter).is_set());
    assert!(!patterns.get(Level::Chapter).matches_prefix(""));
    assert_eq!(classify("1.1.1", &patterns, Level::Section), Level::Section);
}

#[test]
fn resolve_uses_catalog_examples() {
    let pattern = LevelPattern::resolve(
        Level::Chapter,
        Some(&PatternSource::Example("第1章".to_string())),
    )
    .expect("catalog pattern should compile");

    assert_eq!(pattern.as_str(), Some(r"第\d+章"));
    assert!(pattern.matches_prefix("第12章 总论"));
    assert!(!pattern.matches_prefix("第一章 总论"));
}

#[test]
fn resolve_unknown_example_falls_back_to_unset() {
    let pattern = LevelPattern::resolve(
        Level::Subsection,
        Some(&PatternSource::Example("第1章".to_string())),
    )
    .expect("unknown example should not fail");

    assert!(!pattern.is_set());
    assert!(!pattern.matches_prefix("第1章"));
}

#[test]
fn resolve_blank_source_is_unset() {
    let pattern = LevelPattern::resolve(Level::Section, Some(&PatternSource::Example("  ".into())))
        .expect("blank example should not fail");
    assert!(!pattern.is_set());

    let pattern = LevelPattern::resolve(Level::Section, None).expect("missing source");
    assert!(!pattern.is_set());
}

#[test]
fn resolve_rejects_invalid_regex() {
    let err = LevelPattern::resolve(
        Level::Section,
        Some(&PatternSource::Regex(r"\d+(".to_string())),
    )
    .expect_err("unbalanced group should fail");

    assert!(err.to_string().contains("level1"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn outline_serializes_as_record_list() {
    let outline = build(["1 A 2", "1.1 B 3"], &numbered_options());

    let value = serde_json::to_value(&outline).expect("outline should serialize");
    assert_eq!(value[0]["title"], "1 A");
    assert_eq!(value[0]["parent"], serde_json::Value::Null);
    assert_eq!(value[1]["page_number"], 2);
    assert_eq!(value[1]["level"], 1);
    assert_eq!(value[1]["parent"], 0);
}
