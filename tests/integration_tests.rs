//! Integration tests for transchain
//!
//! The orchestrator is driven end to end with real providers whose endpoints
//! point at local mock servers.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use transchain::translate::{DeepLTranslator, GoogleTranslator, LibreTranslator};
use transchain::{
    AttemptOutcome, Config, HttpTimeouts, ProviderKind, Rejection, TranslateError,
    TranslationOrchestrator, Translator,
};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn short_timeouts() -> HttpTimeouts {
    HttpTimeouts {
        connect: Duration::from_secs(1),
        read: Duration::from_millis(300),
    }
}

fn google(server: &MockServer) -> Box<dyn Translator> {
    Box::new(
        GoogleTranslator::new(short_timeouts())
            .unwrap()
            .with_endpoint(format!("{}/translate_a/single", server.uri())),
    )
}

fn libre(server: &MockServer) -> Box<dyn Translator> {
    Box::new(
        LibreTranslator::new(short_timeouts())
            .unwrap()
            .with_endpoint(format!("{}/translate", server.uri())),
    )
}

fn deepl(server: &MockServer) -> Box<dyn Translator> {
    Box::new(
        DeepLTranslator::new("test-key".to_string(), short_timeouts())
            .unwrap()
            .with_endpoint(format!("{}/v2/translate", server.uri())),
    )
}

async fn respond(server: &MockServer, verb: &str, body: &str, expected_calls: u64) {
    Mock::given(method(verb))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// Fallback Order Tests
// ============================================================================

mod fallback_tests {
    use super::*;

    #[tokio::test]
    async fn test_first_provider_wins_and_later_ones_are_not_called() {
        let (g, l, d) = (MockServer::start().await, MockServer::start().await, MockServer::start().await);
        respond(&g, "GET", r#"[[["Bonjour","Hello"]]]"#, 1).await;
        respond(&l, "POST", r#"{"translatedText":"Salut"}"#, 0).await;
        respond(&d, "POST", r#"{"translations":[{"text":"Allô"}]}"#, 0).await;

        let orchestrator = TranslationOrchestrator::new(vec![google(&g), libre(&l), deepl(&d)]);
        let result = orchestrator.translate("Hello", "English", "French").await.unwrap();

        assert_eq!(result, "Bonjour");
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_next_provider() {
        let (g, l) = (MockServer::start().await, MockServer::start().await);
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[[["Bonjour (late)","Hello"]]]"#)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&g)
            .await;
        respond(&l, "POST", r#"{"translatedText":"Bonjour"}"#, 1).await;

        let orchestrator = TranslationOrchestrator::new(vec![google(&g), libre(&l)]);
        let outcome = orchestrator
            .translate_detailed("Hello", "English", "French")
            .await
            .unwrap();

        assert_eq!(outcome.text, "Bonjour");
        assert_eq!(outcome.provider, "libre");
        assert!(matches!(outcome.attempts[0].outcome, AttemptOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_and_next_provider_tried() {
        let (g, d) = (MockServer::start().await, MockServer::start().await);
        respond(&g, "GET", "<html>unusual traffic</html>", 1).await;
        respond(&d, "POST", r#"{"translations":[{"text":"Hallo"}]}"#, 1).await;

        let orchestrator = TranslationOrchestrator::new(vec![google(&g), deepl(&d)]);
        let outcome = orchestrator
            .translate_detailed("Hello", "English", "German")
            .await
            .unwrap();

        assert_eq!(outcome.text, "Hallo");
        assert_eq!(
            outcome.attempts[0].outcome,
            AttemptOutcome::Rejected(Rejection::Echo)
        );
    }

    #[tokio::test]
    async fn test_in_band_error_marker_is_rejected() {
        let (l, d) = (MockServer::start().await, MockServer::start().await);
        respond(&l, "POST", r#"{"translatedText":"Error: model not loaded"}"#, 1).await;
        respond(&d, "POST", r#"{"translations":[{"text":"Hola"}]}"#, 1).await;

        let orchestrator = TranslationOrchestrator::new(vec![libre(&l), deepl(&d)]);
        let outcome = orchestrator
            .translate_detailed("Hello", "English", "Spanish")
            .await
            .unwrap();

        assert_eq!(outcome.text, "Hola");
        assert_eq!(
            outcome.attempts[0].outcome,
            AttemptOutcome::Rejected(Rejection::ErrorMarker)
        );
    }

    #[tokio::test]
    async fn test_unknown_language_name_is_sent_as_auto() {
        let g = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "fr"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[[["Bonjour","Hello"]]]"#))
            .expect(1)
            .mount(&g)
            .await;

        let orchestrator = TranslationOrchestrator::new(vec![google(&g)]);
        let result = orchestrator.translate("Hello", "Elvish", "French").await.unwrap();

        assert_eq!(result, "Bonjour");
    }
}

// ============================================================================
// Exhaustion Tests
// ============================================================================

mod exhaustion_tests {
    use super::*;

    #[tokio::test]
    async fn test_no_op_translation_where_every_provider_echoes() {
        let (g, l, d) = (MockServer::start().await, MockServer::start().await, MockServer::start().await);
        respond(&g, "GET", r#"[[["Bonjour","Bonjour"]]]"#, 1).await;
        respond(&l, "POST", r#"{"translatedText":"Bonjour"}"#, 1).await;
        respond(&d, "POST", r#"{"translations":[{"text":"Bonjour"}]}"#, 1).await;

        let orchestrator = TranslationOrchestrator::new(vec![google(&g), libre(&l), deepl(&d)]);
        let err = orchestrator
            .translate("Bonjour", "French", "French")
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::AllProvidersFailed { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_mixed_failures_are_reported_to_observer() {
        let (g, l) = (MockServer::start().await, MockServer::start().await);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&g)
            .await;
        respond(&l, "POST", r#"{"translatedText":"   "}"#, 1).await;

        let seen: Arc<Mutex<Vec<(usize, AttemptOutcome)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let orchestrator = TranslationOrchestrator::new(vec![google(&g), libre(&l)])
            .with_observer(move |record| {
                sink.lock().unwrap().push((record.position, record.outcome.clone()))
            });

        let err = orchestrator.translate("Hello", "English", "Korean").await.unwrap_err();
        assert!(matches!(err, TranslateError::AllProvidersFailed { attempts: 2, .. }));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 0);
        assert!(matches!(&seen[0].1, AttemptOutcome::Failed(msg) if msg.contains("503")));
        assert_eq!(seen[1], (1, AttemptOutcome::Rejected(Rejection::Blank)));
    }
}

// ============================================================================
// Cancellation and Deadline Tests
// ============================================================================

mod cancellation_tests {
    use super::*;

    async fn slow_google() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[[["Bonjour","Hello"]]]"#)
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_cancellation_does_not_try_next_provider() {
        let g = slow_google().await;
        let l = MockServer::start().await;
        respond(&l, "POST", r#"{"translatedText":"Bonjour"}"#, 0).await;

        let orchestrator = TranslationOrchestrator::new(vec![google(&g), libre(&l)]);
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let err = orchestrator
            .translate_cancellable("Hello", "English", "French", &token)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Cancelled));
    }

    #[tokio::test]
    async fn test_deadline_bounds_the_whole_chain() {
        let g = slow_google().await;
        let l = MockServer::start().await;
        respond(&l, "POST", r#"{"translatedText":"Bonjour"}"#, 0).await;

        let orchestrator = TranslationOrchestrator::new(vec![google(&g), libre(&l)])
            .with_deadline(Duration::from_millis(50));

        let err = orchestrator.translate("Hello", "English", "French").await.unwrap_err();

        assert!(matches!(err, TranslateError::DeadlineExceeded(_)));
    }
}

// ============================================================================
// Config Integration Tests
// ============================================================================

mod config_tests {
    use super::*;
    use transchain::create_translators;

    #[tokio::test]
    async fn test_configured_providers_drive_the_orchestrator() {
        let l = MockServer::start().await;
        respond(&l, "POST", r#"{"translatedText":"Ciao"}"#, 1).await;

        let mut config = Config::default();
        config.providers = Some(vec![ProviderKind::Libre]);
        config.libretranslate_url = format!("{}/translate", l.uri());
        config.validate().unwrap();

        let orchestrator = TranslationOrchestrator::new(create_translators(&config).unwrap());
        assert_eq!(orchestrator.provider_names(), vec!["libre"]);

        let result = orchestrator.translate("Hello", "English", "Italian").await.unwrap();
        assert_eq!(result, "Ciao");
    }
}
