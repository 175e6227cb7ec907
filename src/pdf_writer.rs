use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use lopdf::{Bookmark, Document, Object, ObjectId};
use tracing::debug;

use crate::emit::OutlineSink;

const BOOKMARK_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
const BOOKMARK_FORMAT: u32 = 0;

pub struct LopdfOutlineWriter {
    document: Document,
    pages: Vec<ObjectId>,
    clamped: usize,
}

impl LopdfOutlineWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let document = Document::load(path)
            .with_context(|| format!("failed to load PDF: {}", path.display()))?;
        Self::from_document(document)
            .with_context(|| format!("unusable PDF: {}", path.display()))
    }

    pub fn from_document(document: Document) -> Result<Self> {
        let pages = document.get_pages().into_values().collect::<Vec<ObjectId>>();
        if pages.is_empty() {
            bail!("document has no pages");
        }

        Ok(Self {
            document,
            pages,
            clamped: 0,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn clamped_count(&self) -> usize {
        self.clamped
    }

    /// Writes the document with its new outline to `output`.
    ///
    /// The bytes go to a sibling `.tmp` file that is renamed over `output`
    /// once fully written.
    pub fn finish(mut self, output: &Path) -> Result<PathBuf> {
        if let Some(outline_id) = self.document.build_outline() {
            let root_id = self
                .document
                .trailer
                .get(b"Root")
                .and_then(Object::as_reference)
                .context("PDF trailer has no document catalog")?;
            let catalog = self
                .document
                .get_object_mut(root_id)
                .and_then(Object::as_dict_mut)
                .context("PDF document catalog is not a dictionary")?;
            catalog.set("Outlines", Object::Reference(outline_id));
            catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));
        }

        let temp_path = temporary_sibling(output)?;
        self.document
            .save(&temp_path)
            .with_context(|| format!("failed to write PDF: {}", temp_path.display()))?;

        fs::rename(&temp_path, output).with_context(|| {
            format!(
                "failed to move {} to {}",
                temp_path.display(),
                output.display()
            )
        })?;

        Ok(output.to_path_buf())
    }

    fn page_id(&mut self, page_index: u32) -> ObjectId {
        let last = self.pages.len() - 1;
        let index = usize::try_from(page_index).unwrap_or(usize::MAX);
        if index > last {
            self.clamped += 1;
            debug!(requested = index, last, "clamping bookmark page to last page");
        }
        self.pages[index.min(last)]
    }
}

impl OutlineSink for LopdfOutlineWriter {
    type Handle = u32;

    fn add_bookmark(&mut self, title: &str, page_index: u32, parent: Option<u32>) -> Result<u32> {
        let page = self.page_id(page_index);
        let bookmark = Bookmark::new(title.to_string(), BOOKMARK_COLOR, BOOKMARK_FORMAT, page);
        Ok(self.document.add_bookmark(bookmark, parent))
    }
}

/// `book.pdf` becomes `book_new.pdf` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_new.{}", ext.to_string_lossy()),
        None => format!("{stem}_new"),
    };
    input.with_file_name(file_name)
}

/// Compares canonical paths; `output` itself need not exist yet.
pub fn refers_to_same_file(input: &Path, output: &Path) -> Result<bool> {
    let input = fs::canonicalize(input)
        .with_context(|| format!("failed to resolve {}", input.display()))?;

    let Some(file_name) = output.file_name() else {
        return Ok(false);
    };
    let parent = output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let Ok(parent) = fs::canonicalize(parent) else {
        return Ok(false);
    };

    Ok(parent.join(file_name) == input)
}

fn temporary_sibling(output: &Path) -> Result<PathBuf> {
    let file_name = output
        .file_name()
        .with_context(|| format!("output path has no file name: {}", output.display()))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    Ok(output.with_file_name(temp_name))
}
