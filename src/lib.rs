pub mod config;
pub mod error;
pub mod language;
pub mod orchestrator;
pub mod translate;

pub use config::{Config, HttpTimeouts, ProviderKind};
pub use error::{Result, TranslateError};
pub use language::LanguageCode;
pub use orchestrator::{
    is_valid, validate, AttemptOutcome, AttemptRecord, Rejection, TranslationOrchestrator,
    TranslationOutcome,
};
pub use translate::{create_translator, create_translators, Translator};
