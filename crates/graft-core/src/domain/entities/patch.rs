//! An ordered, inspectable description of edits to one existing file.

use crate::domain::{error::DomainError, imports, placeholder, value_objects::Marker};

/// One edit inside a [`FilePatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchStep {
    /// Put `text` right before `marker`.
    Insert { marker: Marker, text: String },

    /// Relocate `statements` to just before `marker`, removing any copies
    /// already present so each ends up in the file exactly once.
    Imports {
        marker: Marker,
        statements: Vec<String>,
    },
}

impl PatchStep {
    pub fn marker(&self) -> &Marker {
        match self {
            Self::Insert { marker, .. } | Self::Imports { marker, .. } => marker,
        }
    }
}

/// Edits for one file, applied in order against its current content.
///
/// A patch depends only on the operation being scaffolded, never on the
/// file's content, so it can be built and shown before anything is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePatch {
    steps: Vec<PatchStep>,
}

impl FilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, marker: Marker, text: impl Into<String>) -> Self {
        self.steps.push(PatchStep::Insert {
            marker,
            text: text.into(),
        });
        self
    }

    /// An empty `statements` list adds no step.
    pub fn imports(mut self, marker: Marker, statements: Vec<String>) -> Self {
        if !statements.is_empty() {
            self.steps.push(PatchStep::Imports { marker, statements });
        }
        self
    }

    pub fn steps(&self) -> &[PatchStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Distinct markers this patch needs, in first-use order.
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = Vec::new();
        for step in &self.steps {
            if !markers.contains(step.marker()) {
                markers.push(*step.marker());
            }
        }
        markers
    }

    /// Apply every step to `content`.
    ///
    /// The first failing step aborts; nothing partial is returned. Marker
    /// errors come back without a path; callers attach it with
    /// [`DomainError::at`].
    pub fn apply(&self, content: &str) -> Result<String, DomainError> {
        let mut current = content.to_string();

        for step in &self.steps {
            current = match step {
                PatchStep::Insert { marker, text } => placeholder::replace(&current, marker, text)?,
                PatchStep::Imports { marker, statements } => {
                    let (mut filtered, remaining) = imports::dedup(&current, statements);
                    for statement in remaining {
                        filtered = placeholder::replace(&filtered, marker, &format!("{statement}\n"))?;
                    }
                    filtered
                }
            };
        }

        Ok(current)
    }
}
