use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoteRequest {
    /// Page to import; when set, title and content are ignored
    pub note_url: Option<String>,
    /// Alias of `note_url`
    pub url: Option<String>,
    /// Note title, `.md` is appended when missing
    pub note_title: Option<String>,
    /// Note body
    pub note_content: Option<String>,
    /// Directory the note is saved under, locally and remotely
    pub save_note_path: Option<String>,
    /// Value of the `source` front matter field
    pub note_source: Option<String>,
}

impl NoteRequest {
    /// `note_url` wins over `url`; empty strings count as absent.
    pub fn source_url(&self) -> Option<&str> {
        present(self.note_url.as_deref()).or_else(|| present(self.url.as_deref()))
    }

    pub fn title(&self) -> Option<&str> {
        present(self.note_title.as_deref())
    }

    pub fn content(&self) -> Option<&str> {
        present(self.note_content.as_deref())
    }

    pub fn save_dir(&self) -> Option<&str> {
        present(self.save_note_path.as_deref())
    }

    pub fn source_label(&self) -> Option<&str> {
        present(self.note_source.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessNoteResponse {
    pub status: Status,
    /// Human readable outcome
    pub message: String,
}

impl ProcessNoteResponse {
    pub const fn new(success: bool, message: String) -> Self {
        let status = if success {
            Status::Success
        } else {
            Status::Error
        };
        Self { status, message }
    }
}
