//! Translation through Google's public web endpoint.
//!
//! The endpoint is keyless, so requests present themselves as a mobile
//! browser. The response is a nested array such as
//! `[[["Bonjour","Hello",null,null,10]],null,"en"]`; only the first quoted
//! string after the opening `[[["` is needed.

use crate::config::{HttpTimeouts, ProviderKind};
use crate::error::Result;
use crate::language::{provider_code, LanguageCode};
use crate::translate::extract::{first_capture, unescape, FULL_ESCAPES};
use crate::translate::http::{build_client, fetch_body};
use crate::translate::Translator;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use std::sync::LazyLock;
use tracing::{debug, warn};

const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

const MOBILE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

// Google splits the result into one segment per sentence; only the first is taken.
static TRANSLATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\[\s*\[\s*\[\s*"((?:[^"\\]|\\.)*)""#).expect("Invalid regex")
});

/// Google web translation endpoint (GET, query based).
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(timeouts: HttpTimeouts) -> Result<Self> {
        Ok(Self {
            client: build_client(timeouts)?,
            endpoint: GOOGLE_TRANSLATE_URL.to_string(),
        })
    }

    /// Point the translator at a different URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Pull the translation out of a response body, echoing `text` on a miss.
    fn extract(body: &str, text: &str) -> String {
        match first_capture(&TRANSLATION_PATTERN, body) {
            Some(raw) => unescape(raw, FULL_ESCAPES),
            None => {
                warn!("google response did not contain a translation, echoing input");
                text.to_string()
            }
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String> {
        let sl = provider_code(ProviderKind::Google, source);
        let tl = provider_code(ProviderKind::Google, target);
        debug!("google: translating {} chars {} -> {}", text.chars().count(), sl, tl);

        let request = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, MOBILE_USER_AGENT)
            .header(ACCEPT, MOBILE_ACCEPT)
            .query(&[("client", "gtx"), ("sl", sl), ("tl", tl), ("dt", "t"), ("q", text)]);

        let body = fetch_body(self.name(), request).await?;
        Ok(Self::extract(&body, text))
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
