use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::warn;

use super::catalog;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Level {
    #[default]
    Chapter,
    Section,
    Subsection,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Chapter, Level::Section, Level::Subsection];

    pub fn depth(self) -> usize {
        match self {
            Self::Chapter => 0,
            Self::Section => 1,
            Self::Subsection => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chapter => "level0",
            Self::Section => "level1",
            Self::Subsection => "level2",
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.depth() as u8
    }
}

impl TryFrom<u8> for Level {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Chapter),
            1 => Ok(Self::Section),
            2 => Ok(Self::Subsection),
            other => Err(other),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.depth())
    }
}

/// Where a level's pattern comes from: a catalog example such as `第1章`,
/// or a regular expression typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    Example(String),
    Regex(String),
}

#[derive(Debug)]
pub enum LevelPatternError {
    InvalidRegex {
        level: Level,
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for LevelPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { level, pattern, .. } => {
                write!(f, "invalid {} pattern: {pattern}", level.as_str())
            }
        }
    }
}

impl std::error::Error for LevelPatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

/// A compiled classification pattern. The unset pattern never matches.
#[derive(Debug, Clone, Default)]
pub struct LevelPattern {
    source: Option<String>,
    compiled: Option<Regex>,
}

impl LevelPattern {
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn compile(level: Level, pattern: &str) -> Result<Self, LevelPatternError> {
        if pattern.is_empty() {
            return Ok(Self::unset());
        }

        let compiled = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
            LevelPatternError::InvalidRegex {
                level,
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            source: Some(pattern.to_string()),
            compiled: Some(compiled),
        })
    }

    /// Unknown catalog examples degrade to the unset pattern with a warning;
    /// only a user regex that does not compile is an error.
    pub fn resolve(level: Level, source: Option<&PatternSource>) -> Result<Self, LevelPatternError> {
        match source {
            None => Ok(Self::unset()),
            Some(PatternSource::Regex(raw)) => Self::compile(level, raw),
            Some(PatternSource::Example(example)) => {
                let example = example.trim();
                if example.is_empty() {
                    return Ok(Self::unset());
                }

                match catalog::lookup(level, example) {
                    Some(pattern) => Self::compile(level, pattern),
                    None => {
                        let known = catalog::examples(level)
                            .map(|entry| entry.example)
                            .collect::<Vec<&str>>()
                            .join(", ");
                        warn!(
                            level = %level.as_str(),
                            example = %example,
                            known = %known,
                            "unknown level example, level will only be reached by default"
                        );
                        Ok(Self::unset())
                    }
                }
            }
        }
    }

    pub fn is_set(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn matches_prefix(&self, title: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|regex| regex.is_match(title))
    }
}

impl Serialize for LevelPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.source.serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelPatterns {
    pub level0: LevelPattern,
    pub level1: LevelPattern,
    pub level2: LevelPattern,
}

impl LevelPatterns {
    pub fn new(level0: LevelPattern, level1: LevelPattern, level2: LevelPattern) -> Self {
        Self {
            level0,
            level1,
            level2,
        }
    }

    pub fn get(&self, level: Level) -> &LevelPattern {
        match level {
            Level::Chapter => &self.level0,
            Level::Section => &self.level1,
            Level::Subsection => &self.level2,
        }
    }
}

/// Returns the deepest level whose pattern matches the start of `title`.
pub fn classify(title: &str, patterns: &LevelPatterns, default_level: Level) -> Level {
    [Level::Subsection, Level::Section, Level::Chapter]
        .into_iter()
        .find(|level| patterns.get(*level).matches_prefix(title))
        .unwrap_or(default_level)
}
