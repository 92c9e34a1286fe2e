use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// New files staged for creation under an app root.
///
/// This is the output of the template rendering process. It contains no
/// business logic, only data; writing it is the application layer's job.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: RelativePath, content: String) {
        self.files.push(FileToWrite { path, content });
    }

    pub fn with_file(mut self, path: RelativePath, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "rendered output is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(&file.path) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
