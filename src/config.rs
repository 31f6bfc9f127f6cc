use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_READER_BASE_URL: &str = "https://r.jina.ai";
pub const DEFAULT_SAVE_DIR: &str = "obsidian";
pub const DEFAULT_NOTE_SOURCE: &str = "WeChat";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing WebDAV environment configuration: {}", .0.join(", "))]
    MissingWebDav(Vec<&'static str>),

    #[error("failed to read environment configuration: {0}")]
    Env(#[from] envy::Error),
}

#[derive(Debug, Clone)]
pub struct WebDavConfig {
    pub url: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub webdav: WebDavConfig,
    pub save_note_path: Option<String>,
    pub note_source: String,
    pub reader_base_url: String,
    pub port: u16,
}

/// Environment as seen by `envy`; every key is matched case-insensitively.
#[derive(Debug, Deserialize)]
struct RawConfig {
    webdav_url: Option<String>,
    webdav_user: Option<String>,
    webdav_psw: Option<String>,
    save_note_path: Option<String>,
    note_source: Option<String>,
    reader_base_url: Option<String>,
    port: Option<u16>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Directory used when a request does not name one.
    pub fn default_save_dir(&self) -> &str {
        self.save_note_path.as_deref().unwrap_or(DEFAULT_SAVE_DIR)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw: RawConfig = envy::from_iter(vars)?;

        let url = non_empty(raw.webdav_url);
        let user = non_empty(raw.webdav_user);
        let password = non_empty(raw.webdav_psw);

        let (Some(url), Some(user), Some(password)) = (url.clone(), user.clone(), password.clone())
        else {
            let missing = [
                ("webdav_url", url.is_none()),
                ("webdav_user", user.is_none()),
                ("webdav_psw", password.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(ConfigError::MissingWebDav(missing));
        };

        Ok(Self {
            webdav: WebDavConfig {
                url,
                user,
                password,
            },
            save_note_path: non_empty(raw.save_note_path),
            note_source: non_empty(raw.note_source)
                .unwrap_or_else(|| DEFAULT_NOTE_SOURCE.to_string()),
            reader_base_url: non_empty(raw.reader_base_url)
                .unwrap_or_else(|| DEFAULT_READER_BASE_URL.to_string()),
            port: raw.port.unwrap_or(DEFAULT_PORT),
        })
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    // A missing .env file is fine; the process environment may be enough
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded environment overrides from {}", path.display()),
        Err(e) if e.not_found() => {
            tracing::debug!("No .env file found, using process environment only");
        }
        Err(e) => tracing::warn!("Failed to parse .env file: {e}"),
    }

    Config::from_vars(std::env::vars())
}
