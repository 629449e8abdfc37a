use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::docs::{self, DocumentError, DocumentStore};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to list {}: {source}", dir.display())]
    ReadDir { dir: PathBuf, source: io::Error },
}

/// Category name to document slugs, in scan order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: BTreeMap<String, Vec<String>>,
}

impl CategoryIndex {
    pub fn insert(&mut self, category: impl Into<String>, slug: impl Into<String>) {
        self.categories
            .entry(category.into())
            .or_default()
            .push(slug.into());
    }

    /// Documents filed under `category`; empty for unknown names.
    pub fn documents(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug)]
pub struct Skipped {
    pub path: PathBuf,
    pub error: DocumentError,
}

#[derive(Debug, Default)]
pub struct Scan {
    pub index: CategoryIndex,
    pub skipped: Vec<Skipped>,
}

/// Build a fresh index from every document in the store.
///
/// Unreadable or malformed documents are logged and reported in
/// [`Scan::skipped`]; they never abort the scan. Only a failure to list the
/// directory itself is an error.
pub fn scan(store: &DocumentStore) -> Result<Scan, IndexError> {
    let files = store.markdown_files().map_err(|source| IndexError::ReadDir {
        dir: store.root().to_path_buf(),
        source,
    })?;

    let mut result = Scan::default();
    for path in files {
        match docs::load_path(&path) {
            Ok(doc) => {
                if let Some(category) = doc.category() {
                    result.index.insert(category, doc.slug);
                }
            }
            Err(error) => {
                let skipped = Skipped { path, error };
                tracing::warn!(
                    path = %skipped.path.display(),
                    error = %skipped.error,
                    "skipping document"
                );
                result.skipped.push(skipped);
            }
        }
    }

    tracing::debug!(
        categories = result.index.len(),
        skipped = result.skipped.len(),
        "scanned {}",
        store.root().display()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "alpha.md", "---\ntitle: Alpha\ncategory: rust\n---\nA");
        write(dir.path(), "beta.md", "---\ntitle: Beta\ncategory: go\n---\nB");
        write(dir.path(), "gamma.md", "---\ntitle: Gamma\ncategory: rust\n---\nC");
        write(dir.path(), "loose.md", "---\ntitle: Loose\n---\nno category");
        write(dir.path(), "plain.md", "no front matter at all");
        dir
    }

    #[test]
    fn test_scan_groups_by_category() {
        let dir = fixture();
        let scan = scan(&DocumentStore::new(dir.path())).unwrap();

        assert_eq!(scan.index.documents("rust"), ["alpha", "gamma"]);
        assert_eq!(scan.index.documents("go"), ["beta"]);
        assert_eq!(scan.index.categories().collect::<Vec<_>>(), vec!["go", "rust"]);
        assert!(scan.skipped.is_empty());
    }

    #[test]
    fn test_uncategorized_documents_are_not_indexed() {
        let dir = fixture();
        let scan = scan(&DocumentStore::new(dir.path())).unwrap();

        for category in scan.index.categories() {
            let docs = scan.index.documents(category);
            assert!(!docs.iter().any(|s| s == "loose" || s == "plain"));
        }
    }

    #[test]
    fn test_malformed_document_is_skipped() {
        let dir = fixture();
        write(dir.path(), "broken.md", "---\ncategory: [rust\n---\nbody");
        let scan = scan(&DocumentStore::new(dir.path())).unwrap();

        assert_eq!(scan.index.documents("rust"), ["alpha", "gamma"]);
        assert_eq!(scan.skipped.len(), 1);
        assert!(scan.skipped[0].path.ends_with("broken.md"));
        assert!(matches!(
            scan.skipped[0].error,
            DocumentError::Frontmatter { .. }
        ));
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let dir = fixture();
        let store = DocumentStore::new(dir.path());
        let first = scan(&store).unwrap().index;
        let second = scan(&store).unwrap().index;
        assert_eq!(first, second);
        assert_eq!(second.documents("rust").len(), 2);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let index = CategoryIndex::default();
        assert!(index.documents("missing").is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("gone"));
        assert!(matches!(scan(&store), Err(IndexError::ReadDir { .. })));
    }
}
