use crate::models::FetchedNote;

const TITLE_PREFIX: &str = "Title:";
const SOURCE_PREFIX: &str = "URL Source:";
const CONTENT_MARKER: &str = "Markdown Content:";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("extraction service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("extraction response has no 'Markdown Content:' line")]
    MissingContentMarker,
}

/// Converts web pages to markdown through a reader proxy that takes the
/// target URL as its path.
#[derive(Clone)]
pub struct ContentFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ContentFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn reader_url(&self, url: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), url)
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedNote, FetchError> {
        let reader_url = self.reader_url(url);
        tracing::info!("Fetching {} through {}", url, reader_url);

        let body = self.client.get(&reader_url).send().await?.text().await?;

        let note = parse_reader_response(&body)?;
        tracing::info!(
            "Fetched '{}' ({} bytes of content)",
            note.title,
            note.content.len()
        );

        Ok(note)
    }
}

fn header_value<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).map(str::trim)
}

/// Parses the reader's plain-text format:
///
/// ```text
/// Title: <title>
/// URL Source: <url>
/// Markdown Content:
/// <body...>
/// ```
///
/// Header lines must start with their prefix; the first of each wins.
/// Everything after the exact `Markdown Content:` line is the body.
pub fn parse_reader_response(text: &str) -> Result<FetchedNote, FetchError> {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut title = None;
    let mut source = None;
    for line in &lines {
        if title.is_none() {
            title = header_value(line, TITLE_PREFIX);
        }
        if source.is_none() {
            source = header_value(line, SOURCE_PREFIX);
        }
        if title.is_some() && source.is_some() {
            break;
        }
    }

    let marker = lines
        .iter()
        .position(|line| *line == CONTENT_MARKER)
        .ok_or(FetchError::MissingContentMarker)?;

    Ok(FetchedNote {
        title: title.unwrap_or_default().to_string(),
        source: source.unwrap_or_default().to_string(),
        content: lines[marker + 1..].join("\n"),
    })
}
