mod builder;
pub mod catalog;
mod level;
mod line;

pub use builder::{Outline, OutlineOptions, build};
pub use level::{Level, LevelPattern, LevelPatterns, PatternSource};

#[cfg(test)]
mod tests;
