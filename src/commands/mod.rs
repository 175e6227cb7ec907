pub mod apply;
pub mod levels;
pub mod preview;
mod shared;
