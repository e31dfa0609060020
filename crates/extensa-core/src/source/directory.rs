//! Filesystem-based resource locator.
//!
//! Resolves a logical resource path against an ordered list of search roots;
//! every root that contains the file contributes one resource.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use extensa_protocols::{ConfigResource, ResourceLocator};

/// A configuration file on disk.
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
    origin: String,
}

impl FileResource {
    pub fn new(path: PathBuf) -> Self {
        let origin = path.display().to_string();
        Self { path, origin }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigResource for FileResource {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn read(&self) -> std::io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// Locator searching a list of directories.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLocator {
    roots: Vec<PathBuf>,
}

impl DirectoryLocator {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a search root after the existing ones.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceLocator for DirectoryLocator {
    fn locate(&self, path: &str) -> Vec<Arc<dyn ConfigResource>> {
        let mut found: Vec<Arc<dyn ConfigResource>> = Vec::new();

        for root in &self.roots {
            let candidate = root.join(path);
            if candidate.exists() {
                debug!("Found extension resource: {}", candidate.display());
                found.push(Arc::new(FileResource::new(candidate)));
            } else {
                debug!("No extension resource at {}", candidate.display());
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_locate_across_roots() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(first.path(), "META-INF/extensa/svc", "a = x.A");
        write(second.path(), "META-INF/extensa/svc", "b = x.B");

        let locator = DirectoryLocator::new([first.path(), second.path()]);
        let found = locator.locate("META-INF/extensa/svc");

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].read().unwrap(), "a = x.A");
        assert_eq!(found[1].read().unwrap(), "b = x.B");
        assert!(found[0].origin().ends_with("svc"));
    }

    #[test]
    fn test_missing_roots_are_ignored() {
        let root = TempDir::new().unwrap();
        write(root.path(), "META-INF/extensa/svc", "a = x.A");

        let locator = DirectoryLocator::default()
            .with_root("/nonexistent/extensa/root")
            .with_root(root.path());
        assert_eq!(locator.roots().len(), 2);
        assert_eq!(locator.locate("META-INF/extensa/svc").len(), 1);
    }

    #[test]
    fn test_unreadable_resource_reports_io_error() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("META-INF/extensa/svc")).unwrap();

        let locator = DirectoryLocator::new([root.path()]);
        let found = locator.locate("META-INF/extensa/svc");

        assert_eq!(found.len(), 1);
        assert!(found[0].read().is_err());
    }

    #[test]
    fn test_non_utf8_is_rejected() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("svc");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let resource = FileResource::new(path.clone());
        assert_eq!(resource.path(), path.as_path());
        assert!(resource.read().is_err());
    }
}
