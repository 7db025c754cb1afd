use crate::error::{Result, TranslateError};
use crate::language::LanguageCode;
use crate::translate::Translator;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// In-band error marker some providers put in an otherwise successful body.
const ERROR_MARKER: &str = "Error";

/// Why a provider's answer was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty or whitespace only.
    Blank,
    /// Identical to the input, which is also what a parse miss produces.
    Echo,
    /// Starts with the `Error` marker.
    ErrorMarker,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Blank => write!(f, "blank"),
            Rejection::Echo => write!(f, "echo"),
            Rejection::ErrorMarker => write!(f, "error marker"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Accepted,
    Rejected(Rejection),
    Failed(String),
}

/// One provider try within a single `translate` call.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub provider: &'static str,
    /// Index in the fallback order.
    pub position: usize,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

impl std::fmt::Display for AttemptRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            AttemptOutcome::Accepted => write!(f, "{}: accepted", self.provider),
            AttemptOutcome::Rejected(reason) => write!(f, "{}: rejected ({})", self.provider, reason),
            AttemptOutcome::Failed(message) => write!(f, "{}: {}", self.provider, message),
        }
    }
}

/// An accepted translation together with the attempts that led to it.
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub text: String,
    pub provider: &'static str,
    pub attempts: Vec<AttemptRecord>,
}

/// Callback invoked after every provider attempt.
pub type AttemptObserver = Arc<dyn Fn(&AttemptRecord) + Send + Sync>;

/// Check a provider result against the original input.
pub fn validate(result: &str, original: &str) -> std::result::Result<(), Rejection> {
    if result.trim().is_empty() {
        Err(Rejection::Blank)
    } else if result == original {
        Err(Rejection::Echo)
    } else if result.starts_with(ERROR_MARKER) {
        Err(Rejection::ErrorMarker)
    } else {
        Ok(())
    }
}

pub fn is_valid(result: &str, original: &str) -> bool {
    validate(result, original).is_ok()
}

/// Tries providers one at a time, in order, until one returns a valid
/// translation.
///
/// Each provider gets a single attempt per call. Provider errors and rejected
/// results are recorded and skipped; only running out of providers, hitting
/// the deadline, or cancellation is reported to the caller.
pub struct TranslationOrchestrator {
    providers: Vec<Box<dyn Translator>>,
    observer: Option<AttemptObserver>,
    deadline: Option<Duration>,
}

impl TranslationOrchestrator {
    /// Create an orchestrator over `providers`, highest priority first.
    pub fn new(providers: Vec<Box<dyn Translator>>) -> Self {
        Self {
            providers,
            observer: None,
            deadline: None,
        }
    }

    /// Report every attempt to `observer`.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&AttemptRecord) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Bound the whole call, across all providers.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Translate `text` between two language names ("English", "French", ...).
    /// Unknown names are treated as `auto`.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        self.translate_detailed(text, source_language, target_language)
            .await
            .map(|outcome| outcome.text)
    }

    /// Like [`translate`](Self::translate), but also returns the attempt log.
    pub async fn translate_detailed(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome> {
        let source = LanguageCode::from_name(source_language);
        let target = LanguageCode::from_name(target_language);

        match self.deadline {
            Some(limit) => tokio::time::timeout(limit, self.run(text, source, target))
                .await
                .map_err(|_| {
                    warn!("Translation deadline of {:?} exceeded", limit);
                    TranslateError::DeadlineExceeded(limit)
                })?,
            None => self.run(text, source, target).await,
        }
    }

    /// Translate, stopping as soon as `token` is cancelled. The in-flight
    /// request is dropped and no further provider is tried.
    pub async fn translate_cancellable(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        token: &CancellationToken,
    ) -> Result<String> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Translation cancelled");
                Err(TranslateError::Cancelled)
            }
            result = self.translate(text, source_language, target_language) => result,
        }
    }

    async fn run(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<TranslationOutcome> {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for (position, provider) in self.providers.iter().enumerate() {
            let name = provider.name();
            let started = Instant::now();
            debug!("Trying provider {} ({}/{})", name, position + 1, self.providers.len());

            let (outcome, accepted) = match provider.translate(text, source, target).await {
                Ok(result) => match validate(&result, text) {
                    Ok(()) => (AttemptOutcome::Accepted, Some(result)),
                    Err(reason) => {
                        warn!("Provider {} result rejected: {}", name, reason);
                        (AttemptOutcome::Rejected(reason), None)
                    }
                },
                Err(e) => {
                    warn!("Provider {} failed: {}", name, e);
                    (AttemptOutcome::Failed(e.to_string()), None)
                }
            };

            let record = AttemptRecord {
                provider: name,
                position,
                outcome,
                elapsed: started.elapsed(),
            };
            if let Some(observer) = &self.observer {
                observer(&record);
            }
            attempts.push(record);

            if let Some(translation) = accepted {
                info!("Translated with {} in {:.2}s", name, started.elapsed().as_secs_f64());
                return Ok(TranslationOutcome {
                    text: translation,
                    provider: name,
                    attempts,
                });
            }
        }

        let summary = if attempts.is_empty() {
            "no providers configured".to_string()
        } else {
            attempts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        };

        Err(TranslateError::AllProvidersFailed {
            attempts: attempts.len(),
            summary,
        })
    }
}
