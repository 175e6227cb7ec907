use anyhow::{Result, bail};
use tracing::debug;

use crate::outline::Outline;

/// Receives bookmarks parent-first and hands back a handle for each one,
/// which is later passed as the parent of its children.
pub trait OutlineSink {
    type Handle: Copy;

    fn add_bookmark(
        &mut self,
        title: &str,
        page_index: u32,
        parent: Option<Self::Handle>,
    ) -> Result<Self::Handle>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub emitted: usize,
    pub roots: usize,
}

pub fn emit_outline<S: OutlineSink>(outline: &Outline, sink: &mut S) -> Result<EmitSummary> {
    let mut handles: Vec<S::Handle> = Vec::with_capacity(outline.len());
    let mut summary = EmitSummary::default();

    for record in outline {
        let parent = match record.parent {
            None => None,
            Some(parent_index) => match handles.get(parent_index) {
                Some(handle) => Some(*handle),
                None => bail!(
                    "bookmark {} references parent {} before it was emitted",
                    record.index,
                    parent_index
                ),
            },
        };

        debug!(
            index = record.index,
            page = record.page_number,
            parent = ?record.parent,
            title = %record.title,
            "emitting bookmark"
        );

        let handle = sink.add_bookmark(&record.title, record.page_number, parent)?;
        handles.push(handle);

        summary.emitted += 1;
        if parent.is_none() {
            summary.roots += 1;
        }
    }

    Ok(summary)
}
