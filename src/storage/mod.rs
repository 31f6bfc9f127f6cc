use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};

use std::path::{Path, PathBuf};

use crate::config::WebDavConfig;

#[cfg(test)]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid WebDAV configuration: {0}")]
    Config(String),

    #[error("WebDAV request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("WebDAV {op} '{path}' returned {status}")]
    Status {
        op: &'static str,
        path: String,
        status: StatusCode,
    },

    #[error("file_path: '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read local file: {0}")]
    Io(#[from] std::io::Error),
}

/// Remote file store the finished notes are mirrored to.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// Creates a single collection; the parent must already exist.
    async fn mkdir(&self, path: &str) -> Result<(), StoreError>;

    /// Fails with [`StoreError::NotFound`] when `local` does not exist.
    async fn upload_file(&self, local: &Path, remote: &str) -> Result<(), StoreError>;

    /// Creates every missing directory along `path`.
    async fn ensure_dir(&self, path: &str) -> Result<(), StoreError> {
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);

            if !self.exists(&current).await? {
                tracing::info!("Creating remote directory {}", current);
                self.mkdir(&current).await?;
            }
        }
        Ok(())
    }
}

pub struct WebDavStore {
    client: reqwest::Client,
    base: Url,
    user: String,
    password: String,
    propfind: Method,
    mkcol: Method,
}

impl WebDavStore {
    pub fn new(config: &WebDavConfig) -> Result<Self, StoreError> {
        tracing::info!(
            "Initializing WebDAV store at {} as {}",
            config.url,
            config.user
        );

        let base = Url::parse(&config.url)
            .map_err(|e| StoreError::Config(format!("webdav_url '{}': {e}", config.url)))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "webdav_url '{}' cannot hold paths",
                config.url
            )));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StoreError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            user: config.user.clone(),
            password: config.password.clone(),
            propfind: Method::from_bytes(b"PROPFIND")
                .map_err(|e| StoreError::Config(e.to_string()))?,
            mkcol: Method::from_bytes(b"MKCOL").map_err(|e| StoreError::Config(e.to_string()))?,
        })
    }

    fn resource_url(&self, path: &str) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::Config(format!("'{}' cannot hold paths", self.base)))?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, StoreError> {
        let url = self.resource_url(path)?;
        tracing::debug!("WebDAV {} {}", method, url);
        Ok(self
            .client
            .request(method, url)
            .basic_auth(&self.user, Some(&self.password)))
    }
}

#[async_trait]
impl RemoteStore for WebDavStore {
    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let response = self
            .request(self.propfind.clone(), path)?
            .header("Depth", "0")
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StoreError::Status {
                op: "PROPFIND",
                path: path.to_string(),
                status,
            }),
        }
    }

    async fn mkdir(&self, path: &str) -> Result<(), StoreError> {
        let response = self.request(self.mkcol.clone(), path)?.send().await?;

        match response.status() {
            // 405 means the collection is already there
            StatusCode::METHOD_NOT_ALLOWED => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(StoreError::Status {
                op: "MKCOL",
                path: path.to_string(),
                status,
            }),
        }
    }

    async fn upload_file(&self, local: &Path, remote: &str) -> Result<(), StoreError> {
        tracing::info!("Uploading file from {} to {}", local.display(), remote);

        if !tokio::fs::try_exists(local).await? {
            tracing::error!("File not found: {}", local.display());
            return Err(StoreError::NotFound(local.to_path_buf()));
        }

        let bytes = tokio::fs::read(local).await?;
        let response = self.request(Method::PUT, remote)?.body(bytes).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                op: "PUT",
                path: remote.to_string(),
                status,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer, root: &str) -> WebDavStore {
        WebDavStore::new(&WebDavConfig {
            url: format!("{}{root}", server.uri()),
            user: "alice".to_string(),
            password: "secret".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn rejects_unparseable_url() {
        let result = WebDavStore::new(&WebDavConfig {
            url: "not a url".to_string(),
            user: "alice".to_string(),
            password: "secret".to_string(),
        });

        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[tokio::test]
    async fn resource_paths_are_joined_and_encoded() {
        let server = MockServer::start().await;
        let store = store_for(&server, "/dav/");

        let url = store.resource_url("obsidian/my note.md").unwrap();

        assert_eq!(url.path(), "/dav/obsidian/my%20note.md");
    }

    #[tokio::test]
    async fn exists_maps_multistatus_and_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .and(path("/dav/present"))
            .and(header("Depth", "0"))
            .and(basic_auth("alice", "secret"))
            .respond_with(ResponseTemplate::new(207))
            .mount(&server)
            .await;
        Mock::given(method("PROPFIND"))
            .and(path("/dav/absent"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = store_for(&server, "/dav");

        assert!(store.exists("present").await.unwrap());
        assert!(!store.exists("absent").await.unwrap());
    }

    #[tokio::test]
    async fn exists_reports_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = store_for(&server, "/dav");
        let err = store.exists("notes").await.unwrap_err();

        assert!(matches!(
            err,
            StoreError::Status {
                op: "PROPFIND",
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn ensure_dir_creates_only_missing_segments() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .and(path("/dav/vault"))
            .respond_with(ResponseTemplate::new(207))
            .mount(&server)
            .await;
        Mock::given(method("PROPFIND"))
            .and(path("/dav/vault/inbox"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("MKCOL"))
            .and(path("/dav/vault/inbox"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("MKCOL"))
            .and(path("/dav/vault"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let store = store_for(&server, "/dav");
        store.ensure_dir("vault/inbox/").await.unwrap();
    }

    #[tokio::test]
    async fn mkdir_tolerates_existing_collection() {
        let server = MockServer::start().await;
        Mock::given(method("MKCOL"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;

        let store = store_for(&server, "/dav");
        store.mkdir("obsidian").await.unwrap();
    }

    #[tokio::test]
    async fn upload_puts_file_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/dav/obsidian/x.md"))
            .and(basic_auth("alice", "secret"))
            .and(body_string("hello"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("x.md");
        std::fs::write(&local, "hello").unwrap();

        let store = store_for(&server, "/dav");
        store.upload_file(&local, "obsidian/x.md").await.unwrap();
    }

    #[tokio::test]
    async fn upload_of_missing_file_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = store_for(&server, "/dav");
        let err = store
            .upload_file(&dir.path().join("missing.md"), "obsidian/missing.md")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn upload_reports_rejected_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(507))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("x.md");
        std::fs::write(&local, "hello").unwrap();

        let store = store_for(&server, "/dav");
        let err = store.upload_file(&local, "obsidian/x.md").await.unwrap_err();

        assert!(matches!(err, StoreError::Status { op: "PUT", .. }));
    }
}
