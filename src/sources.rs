//! Providers of raw markup sources to merge into one table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// One raw container fragment and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub origin: String,
    pub text: String,
}

impl Source {
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }
}

/// Anything that can hand over the sources of a dataset, in merge order.
pub trait SourceProvider {
    fn sources(&self) -> Result<Vec<Source>>;
}

impl SourceProvider for Vec<Source> {
    fn sources(&self) -> Result<Vec<Source>> {
        Ok(self.clone())
    }
}

/// Every file directly inside a directory whose extension is one of `extensions`, by name.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["html".to_string(), "md".to_string()],
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl SourceProvider for DirectorySource {
    fn sources(&self) -> Result<Vec<Source>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if self.accepts(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        debug!(root = %self.root.display(), count = paths.len(), "discovered sources");

        paths
            .into_iter()
            .map(|path| {
                let text = fs::read_to_string(&path)?;
                Ok(Source::new(path.display().to_string(), text))
            })
            .collect()
    }
}
