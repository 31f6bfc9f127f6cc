use std::path::PathBuf;

/// Page converted by the extraction service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedNote {
    pub title: String,
    pub source: String,
    pub content: String,
}

/// Note ready to be written: title already carries the `.md` extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledNote {
    pub title: String,
    pub content: String,
    pub source: String,
    pub save_dir: String,
    /// Set when the note was imported from a page
    pub origin_url: Option<String>,
}

impl AssembledNote {
    /// Path of the note relative to the remote store root.
    pub fn remote_path(&self) -> String {
        format!("{}/{}", self.save_dir.trim_end_matches('/'), self.title)
    }
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Final result of one request. `message` is returned to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub success: bool,
    pub message: String,
}

impl ProcessOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
