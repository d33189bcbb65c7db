mod common;

use std::sync::Arc;

use assistant_core::fallback_orchestrator::{APOLOGY_MESSAGE, NO_PROVIDER_LABEL};
use assistant_core::{
    ChatError, ChatRequest, FallbackOrchestrator, ProviderClient, ProviderFailure,
    TotalFailurePolicy,
};
use axum::http::StatusCode;
use common::{completion_body, FakeProviderServer, FakeReply, MockProvider};

const BUDGET: usize = 4000;

fn orchestrator(
    primary: Arc<MockProvider>,
    secondary: Arc<MockProvider>,
    policy: TotalFailurePolicy,
) -> FallbackOrchestrator {
    FallbackOrchestrator::new(primary, secondary, BUDGET, policy)
}

#[tokio::test]
async fn primary_success_never_touches_secondary() {
    let primary = MockProvider::answering("groq", "from groq");
    let secondary = MockProvider::answering("openai", "from openai");
    let chat = orchestrator(primary.clone(), secondary.clone(), TotalFailurePolicy::Raise);

    let result = chat
        .respond(&ChatRequest::simple("Hello?").unwrap())
        .await
        .unwrap();

    assert_eq!(result.answer_text(), "from groq");
    assert_eq!(result.provider_used(), "groq");
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 0);
}

#[tokio::test]
async fn primary_failure_falls_back_to_secondary() {
    let primary = MockProvider::failing("groq", 500);
    let secondary = MockProvider::answering("openai", "from openai");
    let chat = orchestrator(primary.clone(), secondary.clone(), TotalFailurePolicy::Raise);

    let result = chat
        .respond(&ChatRequest::simple("Hello?").unwrap())
        .await
        .unwrap();

    assert_eq!(result.provider_used(), "openai");
    assert_eq!(result.answer_text(), "from openai");
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1);
}

#[tokio::test]
async fn unconfigured_primary_is_skipped() {
    let primary = MockProvider::unconfigured("groq");
    let secondary = MockProvider::answering("openai", "from openai");
    let chat = orchestrator(primary.clone(), secondary.clone(), TotalFailurePolicy::Raise);

    let result = chat
        .respond(&ChatRequest::simple("Hello?").unwrap())
        .await
        .unwrap();

    assert_eq!(result.provider_used(), "openai");
    assert_eq!(primary.calls(), 0);
}

#[tokio::test]
async fn both_unconfigured_raises_without_calls() {
    let primary = MockProvider::unconfigured("groq");
    let secondary = MockProvider::unconfigured("openai");
    let chat = orchestrator(primary.clone(), secondary.clone(), TotalFailurePolicy::Raise);

    let err = chat
        .respond(&ChatRequest::simple("Hello?").unwrap())
        .await
        .unwrap_err();

    let ChatError::AllProvidersUnavailable(failure) = err;
    assert!(matches!(failure.primary.cause, ProviderFailure::MissingApiKey));
    assert!(matches!(failure.secondary.cause, ProviderFailure::MissingApiKey));
    assert_eq!(primary.calls(), 0);
    assert_eq!(secondary.calls(), 0);
}

#[tokio::test]
async fn both_failing_names_both_in_message() {
    let chat = orchestrator(
        MockProvider::failing("groq", 502),
        MockProvider::failing("openai", 503),
        TotalFailurePolicy::Raise,
    );

    let err = chat
        .respond(&ChatRequest::simple("Hello?").unwrap())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("groq: HTTP 502"), "{}", message);
    assert!(message.contains("openai: HTTP 503"), "{}", message);
}

#[tokio::test]
async fn apologize_policy_returns_canned_answer() {
    let chat = orchestrator(
        MockProvider::failing("groq", 500),
        MockProvider::unconfigured("openai"),
        TotalFailurePolicy::Apologize,
    );

    let result = chat
        .respond(&ChatRequest::simple("Hello?").unwrap())
        .await
        .unwrap();

    assert_eq!(result.answer_text(), APOLOGY_MESSAGE);
    assert_eq!(result.provider_used(), NO_PROVIDER_LABEL);
}

#[tokio::test]
async fn both_providers_see_the_same_truncated_prompt() {
    let primary = MockProvider::failing("groq", 500);
    let secondary = MockProvider::answering("openai", "ok");
    let chat = orchestrator(primary.clone(), secondary.clone(), TotalFailurePolicy::Raise);

    let document = format!("{}{}", "x".repeat(BUDGET), "TAIL-MARKER");
    chat.respond(&ChatRequest::new(document, "What is the tail?").unwrap())
        .await
        .unwrap();

    let primary_prompts = primary.prompts();
    let secondary_prompts = secondary.prompts();
    assert_eq!(primary_prompts, secondary_prompts);

    let prompt = &secondary_prompts[0];
    assert!(!prompt.contains("TAIL-MARKER"));
    assert_eq!(prompt.matches('x').count(), BUDGET);
}

#[tokio::test]
async fn http_primary_failure_falls_back_over_the_wire() {
    let failing = FakeProviderServer::start(FakeReply::Json(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({ "error": "boom" }),
    ))
    .await;
    let healthy = FakeProviderServer::start(FakeReply::Json(
        StatusCode::OK,
        completion_body("fallback answer"),
    ))
    .await;

    let chat = FallbackOrchestrator::new(
        Arc::new(ProviderClient::new(failing.provider_config("groq", Some("gsk-test")))),
        Arc::new(ProviderClient::new(healthy.provider_config("openai", Some("sk-test")))),
        BUDGET,
        TotalFailurePolicy::Raise,
    );

    let result = chat
        .respond(&ChatRequest::new("Some document.", "Summarize").unwrap())
        .await
        .unwrap();

    assert_eq!(result.provider_used(), "openai");
    assert_eq!(result.answer_text(), "fallback answer");
    assert_eq!(failing.requests().len(), 1);
    assert_eq!(healthy.requests().len(), 1);
}
