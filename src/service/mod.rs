pub mod assembler;
pub mod writer;

use std::sync::Arc;

use crate::{
    config::Config,
    dto::NoteRequest,
    fetcher::ContentFetcher,
    models::{AssembledNote, ProcessOutcome, StoredFile},
    storage::{RemoteStore, StoreError},
};

use assembler::NoteAssembler;
use writer::NoteWriter;

pub const MSG_INVALID_NOTE: &str = "note content or title is empty";
pub const MSG_SAVE_FAILED: &str = "note file save failed";

/// Validates, writes and uploads one note per call. Holds no per-request
/// state, so one instance serves every request.
#[derive(Clone)]
pub struct NoteService {
    assembler: NoteAssembler,
    writer: NoteWriter,
    store: Arc<dyn RemoteStore>,
}

impl NoteService {
    pub fn new(config: &Config, store: Arc<dyn RemoteStore>) -> Self {
        let fetcher = ContentFetcher::new(config.reader_base_url.clone());
        let assembler =
            NoteAssembler::new(fetcher, config.default_save_dir(), config.note_source.clone());

        Self::from_parts(assembler, NoteWriter::new("."), store)
    }

    pub fn from_parts(
        assembler: NoteAssembler,
        writer: NoteWriter,
        store: Arc<dyn RemoteStore>,
    ) -> Self {
        Self {
            assembler,
            writer,
            store,
        }
    }

    pub async fn process_note(&self, request: NoteRequest) -> ProcessOutcome {
        tracing::info!("Validating note");
        let note = match self.assembler.assemble(&request).await {
            Ok(note) => note,
            Err(e) => {
                tracing::error!("Note validation failed: {e}");
                return ProcessOutcome::failed(MSG_INVALID_NOTE);
            }
        };

        let stored = match self.writer.write(&note).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("{e}");
                return ProcessOutcome::failed(MSG_SAVE_FAILED);
            }
        };

        let remote_path = note.remote_path();
        match self.upload(&note, &stored, &remote_path).await {
            Ok(()) => {
                tracing::info!("File successfully uploaded to: {}", remote_path);
                ProcessOutcome::succeeded(format!("note successfully saved to: {remote_path}"))
            }
            Err(e) => {
                // The local copy stays on disk
                tracing::error!("Failed to upload file: {e}");
                ProcessOutcome::failed(format!("upload failed: {e}"))
            }
        }
    }

    async fn upload(
        &self,
        note: &AssembledNote,
        stored: &StoredFile,
        remote_path: &str,
    ) -> Result<(), StoreError> {
        self.store.ensure_dir(&note.save_dir).await?;
        self.store.upload_file(&stored.path, remote_path).await
    }
}
