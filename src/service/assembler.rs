use rand::{Rng, rng};

use crate::{
    dto::NoteRequest,
    fetcher::{ContentFetcher, FetchError},
    models::AssembledNote,
};

const NOTE_EXTENSION: &str = ".md";
const RANDOM_TITLE_LEN: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("failed to get note from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("note content is empty")]
    MissingContent,
}

/// Appends `.md` unless the title already ends with it.
pub fn ensure_md_extension(title: &str) -> String {
    if title.ends_with(NOTE_EXTENSION) {
        title.to_string()
    } else {
        format!("{title}{NOTE_EXTENSION}")
    }
}

/// Random numeric string used as a title when none is given.
pub fn random_code() -> String {
    let mut rng = rng();
    let code: String = (0..RANDOM_TITLE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    tracing::info!("Generated random code: {}", code);
    code
}

/// Path separators would turn a title into a nested path.
fn file_name(title: &str) -> String {
    title.replace(['/', '\\'], "-")
}

/// Decides where a note's title and content come from.
#[derive(Clone)]
pub struct NoteAssembler {
    fetcher: ContentFetcher,
    default_save_dir: String,
    default_source: String,
}

impl NoteAssembler {
    pub fn new(
        fetcher: ContentFetcher,
        default_save_dir: impl Into<String>,
        default_source: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            default_save_dir: default_save_dir.into(),
            default_source: default_source.into(),
        }
    }

    /// A URL takes priority over any supplied title or content. Without one,
    /// content is mandatory and a missing title is replaced by a random code.
    pub async fn assemble(&self, request: &NoteRequest) -> Result<AssembledNote, AssembleError> {
        let save_dir = request
            .save_dir()
            .unwrap_or(&self.default_save_dir)
            .to_string();

        if let Some(url) = request.source_url() {
            return self.assemble_from_url(url, save_dir).await;
        }

        let content = request.content().ok_or(AssembleError::MissingContent)?;
        let title = request
            .title()
            .map_or_else(|| ensure_md_extension(&random_code()), ensure_md_extension);

        Ok(AssembledNote {
            title: file_name(&title),
            content: content.to_string(),
            source: request
                .source_label()
                .unwrap_or(&self.default_source)
                .to_string(),
            save_dir,
            origin_url: None,
        })
    }

    async fn assemble_from_url(
        &self,
        url: &str,
        save_dir: String,
    ) -> Result<AssembledNote, AssembleError> {
        tracing::info!("Getting note from URL: {}", url);

        let fetched = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|source| AssembleError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if fetched.content.is_empty() {
            return Err(AssembleError::MissingContent);
        }

        let title = if fetched.title.is_empty() {
            random_code()
        } else {
            fetched.title
        };

        Ok(AssembledNote {
            title: file_name(&format!("{title}{NOTE_EXTENSION}")),
            content: fetched.content,
            source: fetched.source,
            save_dir,
            origin_url: Some(url.to_string()),
        })
    }
}
