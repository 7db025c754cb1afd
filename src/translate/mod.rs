pub mod deepl;
mod extract;
pub mod google;
mod http;
pub mod libre;

pub use deepl::DeepLTranslator;
pub use extract::unescape;
pub use google::GoogleTranslator;
pub use libre::LibreTranslator;

use crate::config::{Config, ProviderKind};
use crate::error::{Result, TranslateError};
use crate::language::LanguageCode;
use async_trait::async_trait;

/// A single translation backend.
///
/// `translate` issues exactly one request. Transport failures (timeouts,
/// refused connections, non-2xx statuses) come back as
/// [`TranslateError::Transport`]. A body that does not contain a translation
/// is not an error: the provider returns `text` unchanged and leaves the
/// judgement to the orchestrator.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: LanguageCode, target: LanguageCode)
        -> Result<String>;
    fn name(&self) -> &'static str;
}

/// Build the translator for `kind` from `config`.
pub fn create_translator(kind: ProviderKind, config: &Config) -> Result<Box<dyn Translator>> {
    let timeouts = config.timeouts();

    let translator: Box<dyn Translator> = match kind {
        ProviderKind::Google => Box::new(GoogleTranslator::new(timeouts)?),
        ProviderKind::Libre => {
            let mut libre =
                LibreTranslator::new(timeouts)?.with_endpoint(config.libretranslate_url.clone());
            if let Some(key) = &config.libretranslate_api_key {
                libre = libre.with_api_key(key.clone());
            }
            Box::new(libre)
        }
        ProviderKind::DeepL => {
            let key = config.deepl_api_key.clone().ok_or_else(|| {
                TranslateError::Config("DEEPL_API_KEY not set".to_string())
            })?;
            Box::new(
                DeepLTranslator::new(key, timeouts)?.with_endpoint(config.deepl_api_url.clone()),
            )
        }
    };

    Ok(translator)
}

/// Build every configured translator, preserving the configured order.
pub fn create_translators(config: &Config) -> Result<Vec<Box<dyn Translator>>> {
    config
        .provider_order()
        .into_iter()
        .map(|kind| create_translator(kind, config))
        .collect()
}
