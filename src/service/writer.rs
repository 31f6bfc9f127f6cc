use chrono::Local;

use std::path::{Path, PathBuf};

use crate::models::{AssembledNote, StoredFile};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
#[error("failed to save note file {}: {source}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Front matter, a blank line, then the body. Imported notes start with a
/// link back to the page they came from.
pub fn render(note: &AssembledNote, date: &str) -> String {
    let body = match &note.origin_url {
        Some(url) => format!("[Original link]({url})\n{}", note.content),
        None => note.content.clone(),
    };

    format!(
        "---\ndate: {date}\nsource: {}\n---\n\n{body}\n",
        note.source
    )
}

/// Writes notes under `root`; relative save directories resolve against it.
#[derive(Debug, Clone)]
pub struct NoteWriter {
    root: PathBuf,
}

impl NoteWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn write(&self, note: &AssembledNote) -> Result<StoredFile, WriteError> {
        let dir = self.root.join(&note.save_dir);
        let path = dir.join(&note.title);
        tracing::info!("Saving note file to {}", path.display());

        let contents = render(note, &Local::now().format(DATE_FORMAT).to_string());

        write_file(&dir, &path, &contents)
            .await
            .map_err(|source| WriteError {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Note file saved at: {}", path.display());
        Ok(StoredFile { path, contents })
    }
}

async fn write_file(dir: &Path, path: &Path, contents: &str) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, contents).await
}
