//! Language name and code tables.
//!
//! Callers speak in display names ("English", "Chinese"). Those resolve to a
//! provider-agnostic [`LanguageCode`], which each provider then maps onto its
//! own vocabulary with [`provider_code`].

use crate::config::ProviderKind;

/// Provider-agnostic language identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageCode {
    /// Unspecified; the provider should detect the language.
    Auto,
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Russian,
    Chinese,
    Japanese,
    Korean,
    Arabic,
    Hindi,
    Turkish,
    Dutch,
    Polish,
    Vietnamese,
    Thai,
    Indonesian,
    Ukrainian,
}

const SUPPORTED: [LanguageCode; 19] = [
    LanguageCode::English,
    LanguageCode::French,
    LanguageCode::German,
    LanguageCode::Spanish,
    LanguageCode::Italian,
    LanguageCode::Portuguese,
    LanguageCode::Russian,
    LanguageCode::Chinese,
    LanguageCode::Japanese,
    LanguageCode::Korean,
    LanguageCode::Arabic,
    LanguageCode::Hindi,
    LanguageCode::Turkish,
    LanguageCode::Dutch,
    LanguageCode::Polish,
    LanguageCode::Vietnamese,
    LanguageCode::Thai,
    LanguageCode::Indonesian,
    LanguageCode::Ukrainian,
];

impl LanguageCode {
    /// Resolve a display name. Matching is exact and case-sensitive; anything
    /// unrecognized becomes [`LanguageCode::Auto`].
    pub fn from_name(name: &str) -> Self {
        SUPPORTED
            .iter()
            .copied()
            .find(|code| code.name() == name)
            .unwrap_or(LanguageCode::Auto)
    }

    /// Every concrete language, excluding `Auto`.
    pub fn supported() -> &'static [LanguageCode] {
        &SUPPORTED
    }

    pub fn name(&self) -> &'static str {
        match self {
            LanguageCode::Auto => "auto",
            LanguageCode::English => "English",
            LanguageCode::French => "French",
            LanguageCode::German => "German",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::Italian => "Italian",
            LanguageCode::Portuguese => "Portuguese",
            LanguageCode::Russian => "Russian",
            LanguageCode::Chinese => "Chinese",
            LanguageCode::Japanese => "Japanese",
            LanguageCode::Korean => "Korean",
            LanguageCode::Arabic => "Arabic",
            LanguageCode::Hindi => "Hindi",
            LanguageCode::Turkish => "Turkish",
            LanguageCode::Dutch => "Dutch",
            LanguageCode::Polish => "Polish",
            LanguageCode::Vietnamese => "Vietnamese",
            LanguageCode::Thai => "Thai",
            LanguageCode::Indonesian => "Indonesian",
            LanguageCode::Ukrainian => "Ukrainian",
        }
    }

    /// Short generic code (ISO 639-1 style).
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Auto => "auto",
            LanguageCode::English => "en",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Spanish => "es",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Russian => "ru",
            LanguageCode::Chinese => "zh",
            LanguageCode::Japanese => "ja",
            LanguageCode::Korean => "ko",
            LanguageCode::Arabic => "ar",
            LanguageCode::Hindi => "hi",
            LanguageCode::Turkish => "tr",
            LanguageCode::Dutch => "nl",
            LanguageCode::Polish => "pl",
            LanguageCode::Vietnamese => "vi",
            LanguageCode::Thai => "th",
            LanguageCode::Indonesian => "id",
            LanguageCode::Ukrainian => "uk",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a generic code onto `provider`'s vocabulary. Languages the provider
/// has no entry for fall back to its English code, so a request can always
/// be built.
pub fn provider_code(provider: ProviderKind, code: LanguageCode) -> &'static str {
    match provider {
        ProviderKind::Google => google_code(code).unwrap_or("en"),
        ProviderKind::Libre => libre_code(code).unwrap_or("en"),
        ProviderKind::DeepL => deepl_code(code).unwrap_or("EN"),
    }
}

/// DeepL code for a target language. English and Portuguese targets take a
/// regional variant; bare `EN` and `PT` are deprecated as targets.
pub fn deepl_target_code(code: LanguageCode) -> &'static str {
    match provider_code(ProviderKind::DeepL, code) {
        "EN" => "EN-US",
        "PT" => "PT-PT",
        other => other,
    }
}

fn google_code(code: LanguageCode) -> Option<&'static str> {
    match code {
        // Google wants the region-qualified form for Simplified Chinese.
        LanguageCode::Chinese => Some("zh-CN"),
        other => Some(other.as_str()),
    }
}

fn libre_code(code: LanguageCode) -> Option<&'static str> {
    Some(code.as_str())
}

fn deepl_code(code: LanguageCode) -> Option<&'static str> {
    match code {
        LanguageCode::English => Some("EN"),
        LanguageCode::French => Some("FR"),
        LanguageCode::German => Some("DE"),
        LanguageCode::Spanish => Some("ES"),
        LanguageCode::Italian => Some("IT"),
        LanguageCode::Portuguese => Some("PT"),
        LanguageCode::Russian => Some("RU"),
        LanguageCode::Chinese => Some("ZH"),
        LanguageCode::Japanese => Some("JA"),
        LanguageCode::Korean => Some("KO"),
        LanguageCode::Arabic => Some("AR"),
        LanguageCode::Turkish => Some("TR"),
        LanguageCode::Dutch => Some("NL"),
        LanguageCode::Polish => Some("PL"),
        LanguageCode::Indonesian => Some("ID"),
        LanguageCode::Ukrainian => Some("UK"),
        // DeepL has no detect token and no Hindi, Vietnamese or Thai.
        LanguageCode::Auto | LanguageCode::Hindi | LanguageCode::Vietnamese | LanguageCode::Thai => {
            None
        }
    }
}
