use crate::error::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Translation backends, in their default fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Libre,
    DeepL,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Google, ProviderKind::Libre, ProviderKind::DeepL];
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Google => write!(f, "google"),
            ProviderKind::Libre => write!(f, "libre"),
            ProviderKind::DeepL => write!(f, "deepl"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "libre" | "libretranslate" => Ok(ProviderKind::Libre),
            "deepl" => Ok(ProviderKind::DeepL),
            _ => Err(format!(
                "Unknown provider: {}. Use 'google', 'libre', or 'deepl'",
                s
            )),
        }
    }
}

/// Parse a comma separated provider list such as `google,deepl`.
pub fn parse_provider_list(list: &str) -> std::result::Result<Vec<ProviderKind>, String> {
    list.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Connect and read timeouts applied to every provider request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            read: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit fallback order. `None` means keyless providers first, then
    /// DeepL when a key is available. See [`Config::provider_order`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<ProviderKind>>,
    pub libretranslate_url: String,
    pub libretranslate_api_key: Option<String>,
    pub deepl_api_url: String,
    pub deepl_api_key: Option<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub deadline_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: None,
            libretranslate_url: "http://127.0.0.1:5000/translate".to_string(),
            libretranslate_api_key: None,
            deepl_api_url: "https://api-free.deepl.com/v2/translate".to_string(),
            deepl_api_key: None,
            connect_timeout_secs: 15,
            read_timeout_secs: 20,
            deadline_secs: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Read a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            TranslateError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn apply_env(&mut self) {
        if let Ok(providers) = std::env::var("TRANSCHAIN_PROVIDERS") {
            if let Ok(list) = parse_provider_list(&providers) {
                self.providers = Some(list);
            }
        }
        if let Ok(url) = std::env::var("LIBRETRANSLATE_URL") {
            self.libretranslate_url = url;
        }
        if let Ok(key) = std::env::var("LIBRETRANSLATE_API_KEY") {
            self.libretranslate_api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Ok(url) = std::env::var("DEEPL_API_URL") {
            self.deepl_api_url = url;
        }
        if let Ok(key) = std::env::var("DEEPL_API_KEY") {
            self.deepl_api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Ok(secs) = std::env::var("TRANSCHAIN_CONNECT_TIMEOUT") {
            if let Ok(s) = secs.parse() {
                self.connect_timeout_secs = s;
            }
        }
        if let Ok(secs) = std::env::var("TRANSCHAIN_READ_TIMEOUT") {
            if let Ok(s) = secs.parse() {
                self.read_timeout_secs = s;
            }
        }
        if let Ok(secs) = std::env::var("TRANSCHAIN_DEADLINE") {
            if let Ok(s) = secs.parse() {
                self.deadline_secs = Some(s);
            }
        }
    }

    /// Providers to try, in order.
    pub fn provider_order(&self) -> Vec<ProviderKind> {
        match &self.providers {
            Some(list) => list.clone(),
            None => ProviderKind::ALL
                .into_iter()
                .filter(|kind| *kind != ProviderKind::DeepL || self.deepl_api_key.is_some())
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let providers = self.provider_order();
        if providers.is_empty() {
            return Err(TranslateError::Config(
                "At least one provider must be configured".to_string(),
            ));
        }

        for (i, kind) in providers.iter().enumerate() {
            if providers[..i].contains(kind) {
                return Err(TranslateError::Config(format!(
                    "Provider '{}' is listed more than once",
                    kind
                )));
            }
        }

        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(TranslateError::Config(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        if self.deadline_secs == Some(0) {
            return Err(TranslateError::Config(
                "Deadline must be greater than 0".to_string(),
            ));
        }

        if providers.contains(&ProviderKind::DeepL) && self.deepl_api_key.is_none() {
            return Err(TranslateError::Config(
                "DEEPL_API_KEY not set. Get one at https://www.deepl.com/pro-api or drop 'deepl' from the provider list"
                    .to_string(),
            ));
        }

        Ok(())
    }

    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("transchain").join("config.toml"))
    }
}
