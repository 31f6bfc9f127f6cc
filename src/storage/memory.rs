use async_trait::async_trait;
use reqwest::StatusCode;

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::Mutex,
};

use super::{RemoteStore, StoreError};

/// Remote store kept in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub dirs: Mutex<BTreeSet<String>>,
    /// (local path, remote path, uploaded contents)
    pub files: Mutex<Vec<(PathBuf, String, String)>>,
    pub reject_uploads: bool,
}

impl MemoryStore {
    pub fn rejecting() -> Self {
        Self {
            reject_uploads: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.dirs.lock().unwrap().contains(path))
    }

    async fn mkdir(&self, path: &str) -> Result<(), StoreError> {
        self.dirs.lock().unwrap().insert(path.to_string());
        Ok(())
    }

    async fn upload_file(&self, local: &Path, remote: &str) -> Result<(), StoreError> {
        if self.reject_uploads {
            return Err(StoreError::Status {
                op: "PUT",
                path: remote.to_string(),
                status: StatusCode::INSUFFICIENT_STORAGE,
            });
        }
        let contents = std::fs::read_to_string(local)?;
        self.files
            .lock()
            .unwrap()
            .push((local.to_path_buf(), remote.to_string(), contents));
        Ok(())
    }
}
