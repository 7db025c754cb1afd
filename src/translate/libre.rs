//! LibreTranslate, the open-source self-hostable translation server.

use crate::config::{HttpTimeouts, ProviderKind};
use crate::error::Result;
use crate::language::{provider_code, LanguageCode};
use crate::translate::extract::{first_capture, unescape, BASIC_ESCAPES};
use crate::translate::http::{build_client, fetch_body, APP_USER_AGENT};
use crate::translate::Translator;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Default local LibreTranslate instance.
const LIBRE_TRANSLATE_URL: &str = "http://127.0.0.1:5000/translate";

static TRANSLATED_TEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""translatedText"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("Invalid regex")
});

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

pub struct LibreTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslator {
    pub fn new(timeouts: HttpTimeouts) -> Result<Self> {
        Ok(Self {
            client: build_client(timeouts)?,
            endpoint: LIBRE_TRANSLATE_URL.to_string(),
            api_key: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Needed for libretranslate.com and for instances started with `--api-keys`.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn extract(body: &str, text: &str) -> String {
        match first_capture(&TRANSLATED_TEXT_PATTERN, body) {
            Some(raw) => unescape(raw, BASIC_ESCAPES),
            None => {
                warn!("libre response did not contain a translation, echoing input");
                text.to_string()
            }
        }
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String> {
        let payload = LibreRequest {
            q: text,
            source: provider_code(ProviderKind::Libre, source),
            target: provider_code(ProviderKind::Libre, target),
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        debug!(
            "libre: translating {} chars {} -> {} via {}",
            text.chars().count(),
            payload.source,
            payload.target,
            self.endpoint
        );

        let request = self
            .client
            .post(&self.endpoint)
            .header(USER_AGENT, APP_USER_AGENT)
            .json(&payload);

        let body = fetch_body(self.name(), request).await?;
        Ok(Self::extract(&body, text))
    }

    fn name(&self) -> &'static str {
        "libre"
    }
}
