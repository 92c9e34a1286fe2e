//! Progress events emitted while scaffolding.

use std::fmt;

/// Where an event sits in a unit of work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressIndication {
    #[default]
    None,
    Start,
    Update,
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub message: String,
    pub icon: Option<&'static str>,
    pub progress: ProgressIndication,
    /// Only shown at higher verbosity.
    pub verbose: bool,
}

impl Event {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: None,
            progress: ProgressIndication::None,
            verbose: false,
        }
    }

    pub fn start(message: impl Into<String>) -> Self {
        Self::new(message).with_progress(ProgressIndication::Start)
    }

    pub fn update(message: impl Into<String>) -> Self {
        Self::new(message).with_progress(ProgressIndication::Update)
    }

    pub fn finish(message: impl Into<String>) -> Self {
        Self::new(message).with_progress(ProgressIndication::Finish)
    }

    pub fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_progress(mut self, progress: ProgressIndication) -> Self {
        self.progress = progress;
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// True while work started by this event has not finished.
    pub fn in_progress(&self) -> bool {
        matches!(
            self.progress,
            ProgressIndication::Start | ProgressIndication::Update
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.icon {
            Some(icon) => write!(f, "{icon} {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

pub mod icons {
    pub const OK: &str = "✔";
    pub const NOT_OK: &str = "✘";
    pub const CREATED: &str = "+";
    pub const MODIFIED: &str = "~";
}
