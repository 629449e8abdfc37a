use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::frontmatter::{self, FrontmatterError, Metadata};

pub const EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document slug {0:?}")]
    InvalidSlug(String),

    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
}

#[derive(Debug)]
pub struct Document {
    pub slug: String,
    pub metadata: Metadata,
    pub markdown: String,
}

impl Document {
    pub fn title(&self) -> Option<String> {
        self.metadata.title()
    }

    pub fn category(&self) -> Option<String> {
        self.metadata.category()
    }
}

/// Read-only view over the document directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, slug: &str) -> Result<PathBuf, DocumentError> {
        if !is_valid_slug(slug) {
            return Err(DocumentError::InvalidSlug(slug.to_string()));
        }
        Ok(self.root.join(format!("{slug}.{EXTENSION}")))
    }

    pub fn load(&self, slug: &str) -> Result<Document, DocumentError> {
        let path = self.path_for(slug)?;
        load_path(&path)
    }

    /// Visible markdown files directly inside the root, ordered by file name.
    pub fn markdown_files(&self) -> io::Result<Vec<PathBuf>> {
        // The walker reports an unreadable root per entry; check it up front
        // so the caller can tell "no documents" from "no directory".
        fs::read_dir(&self.root)?;

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(true)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            // `is_file` follows symlinks, so linked notes are listed too.
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }
}

pub fn load_path(path: &Path) -> Result<Document, DocumentError> {
    let slug =
        slug_of(path).ok_or_else(|| DocumentError::InvalidSlug(path.display().to_string()))?;
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            DocumentError::NotFound(path.to_path_buf())
        } else {
            DocumentError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed = frontmatter::parse(&content).map_err(|source| DocumentError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Document {
        slug,
        metadata: parsed.metadata,
        markdown: parsed.markdown,
    })
}

pub fn slug_of(path: &Path) -> Option<String> {
    if path.extension()? != EXTENSION {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

/// A slug must name a file directly inside the document directory.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
}
