//! DeepL REST API translator.

use crate::config::{HttpTimeouts, ProviderKind};
use crate::error::Result;
use crate::language::{deepl_target_code, provider_code, LanguageCode};
use crate::translate::extract::{first_capture, unescape, BASIC_ESCAPES};
use crate::translate::http::{build_client, fetch_body, APP_USER_AGENT};
use crate::translate::Translator;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// DeepL API endpoint (free tier).
const DEEPL_API_URL: &str = "https://api-free.deepl.com/v2/translate";

static TEXT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""text"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("Invalid regex"));

#[derive(Serialize)]
struct DeepLRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'static str>,
}

/// Translator using the DeepL API. Paid and quota-limited, so it usually
/// sits last in the fallback order.
pub struct DeepLTranslator {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, timeouts: HttpTimeouts) -> Result<Self> {
        Ok(Self {
            client: build_client(timeouts)?,
            api_key,
            endpoint: DEEPL_API_URL.to_string(),
        })
    }

    /// Use a different endpoint, e.g. `https://api.deepl.com/v2/translate` for Pro keys.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request<'a>(
        text: &'a str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> DeepLRequest<'a> {
        // DeepL detects the source language when `source_lang` is omitted.
        let source_lang = match source {
            LanguageCode::Auto => None,
            code => Some(provider_code(ProviderKind::DeepL, code)),
        };

        DeepLRequest {
            text: [text],
            target_lang: deepl_target_code(target),
            source_lang,
        }
    }

    fn extract(body: &str, text: &str) -> String {
        match first_capture(&TEXT_PATTERN, body) {
            Some(raw) => unescape(raw, BASIC_ESCAPES),
            None => {
                warn!("deepl response did not contain a translation, echoing input");
                text.to_string()
            }
        }
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String> {
        let payload = Self::build_request(text, source, target);
        debug!(
            "deepl: translating {} chars {:?} -> {}",
            text.chars().count(),
            payload.source_lang,
            payload.target_lang
        );

        let request = self
            .client
            .post(&self.endpoint)
            .header(USER_AGENT, APP_USER_AGENT)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .json(&payload);

        let body = fetch_body(self.name(), request).await?;
        Ok(Self::extract(&body, text))
    }

    fn name(&self) -> &'static str {
        "deepl"
    }
}
