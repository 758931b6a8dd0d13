//! Integration tests for the batch pipeline.
//!
//! Uses wiremock for the scoring server and a scripted provider in place of
//! the Gemini-backed solver. Covers enrichment rendering, partial provider
//! failure, the empty-answers short circuit, and submission status
//! formatting.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use svar::batch::BatchRunner;
use svar::config::ScoringSettings;
use svar::scoring::ScoringClient;
use svar::solver::AnswerProvider;
use svar::SvarError;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider that fails on questions containing "FAIL" and records every
/// prompt it sees.
struct ScriptedProvider {
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerProvider for ScriptedProvider {
    async fn answer(&self, question: &str) -> svar::Result<String> {
        self.prompts.lock().unwrap().push(question.to_string());
        if question.contains("FAIL") {
            Err(SvarError::Provider("scripted failure".to_string()))
        } else {
            Ok("The answer is 42".to_string())
        }
    }
}

fn scoring_client(server: &MockServer) -> ScoringClient {
    let settings = ScoringSettings {
        api_url: server.uri(),
        ..Default::default()
    };
    ScoringClient::new(&settings).expect("failed to create scoring client")
}

fn runner(server: &MockServer, provider: Arc<dyn AnswerProvider>) -> BatchRunner {
    BatchRunner::new(
        scoring_client(server),
        provider,
        "https://example.com/agent".to_string(),
    )
}

#[tokio::test]
async fn test_enrich_404_yields_empty_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/t1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = scoring_client(&server);
    assert_eq!(client.fetch_file_context("t1").await, "");
}

#[tokio::test]
async fn test_enrich_renders_json_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["data.csv", "notes.txt"])))
        .mount(&server)
        .await;

    let client = scoring_client(&server);
    let context = client.fetch_file_context("t1").await;
    assert!(context.starts_with("\n\nAssociated files for this task:"));
    assert!(context.contains("data.csv"));
}

#[tokio::test]
async fn test_enrich_renders_json_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"filename": "data.csv"})))
        .mount(&server)
        .await;

    let client = scoring_client(&server);
    let context = client.fetch_file_context("t1").await;
    assert!(context.starts_with("\n\nFile data:"));
    assert!(context.contains("data.csv"));
}

#[tokio::test]
async fn test_enrich_invalid_json_falls_back_to_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("definitely not json", "application/json"))
        .mount(&server)
        .await;

    let client = scoring_client(&server);
    let context = client.fetch_file_context("t1").await;
    assert_eq!(context, "\n\nFile content:\ndefinitely not json");
}

#[tokio::test]
async fn test_enrich_renders_text_truncated() {
    let server = MockServer::start().await;

    let body = "x".repeat(6000);
    Mock::given(method("GET"))
        .and(path("/files/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain"))
        .mount(&server)
        .await;

    let client = scoring_client(&server);
    let context = client.fetch_file_context("t1").await;
    assert!(context.starts_with("\n\nFile content:\n"));
    let rendered = context.trim_start_matches("\n\nFile content:\n");
    assert_eq!(rendered.len(), 5000);
}

#[tokio::test]
async fn test_enrich_binary_placeholder_without_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/t1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0u8; 128], "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let client = scoring_client(&server);
    let context = client.fetch_file_context("t1").await;
    assert_eq!(
        context,
        "\n\n[Binary file of type application/octet-stream - 128 bytes]"
    );
}

#[tokio::test]
async fn test_enriched_question_includes_file_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"task_id": "t1", "question": "What is in the file?"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("contents here", "text/plain"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "tester", "score": 100, "correct_count": 1,
            "total_attempted": 1, "message": "ok"
        })))
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider.clone()).run("tester").await;

    assert!(outcome.status.contains("Submission Successful"));
    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(
        prompts[0],
        "What is in the file?\n\nFile content:\ncontents here"
    );
}

#[tokio::test]
async fn test_enrich_404_leaves_question_bare() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"task_id": "t1", "question": "Bare question?"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/files/.*"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "tester", "score": 0, "correct_count": 0,
            "total_attempted": 1, "message": "ok"
        })))
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    runner(&server, provider.clone()).run("tester").await;

    assert_eq!(provider.prompts(), vec!["Bare question?".to_string()]);
}

#[tokio::test]
async fn test_partial_failure_processes_all_questions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"task_id": "t1", "question": "First?"},
            {"task_id": "t2", "question": "Second, please FAIL"},
            {"task_id": "t3", "question": "Third?"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/files/.*"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "tester", "score": 100, "correct_count": 2,
            "total_attempted": 2, "message": "ok"
        })))
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider).run("tester").await;

    // All three questions appear in order; the failure never aborts the batch.
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.records[0].task_id, "t1");
    assert_eq!(outcome.records[0].submitted_answer, "42");
    assert_eq!(outcome.records[1].task_id, "t2");
    assert!(outcome.records[1].submitted_answer.starts_with("AGENT ERROR:"));
    assert_eq!(outcome.records[2].task_id, "t3");
    assert_eq!(outcome.records[2].submitted_answer, "42");

    // Only the two real answers were submitted.
    let requests = server.received_requests().await.unwrap();
    let submit = requests
        .iter()
        .find(|r| r.url.path() == "/submit")
        .expect("no submission was made");
    let payload: serde_json::Value = serde_json::from_slice(&submit.body).unwrap();
    assert_eq!(payload["username"], "tester");
    assert_eq!(payload["agent_code"], "https://example.com/agent");
    assert_eq!(payload["answers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_answers_short_circuits_submission() {
    let server = MockServer::start().await;

    // Every item is missing a usable task_id or question text.
    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {},
            {"task_id": "", "question": "q"},
            {"task_id": "t3"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider.clone()).run("tester").await;

    assert!(outcome.status.contains("did not produce any answers"));
    assert!(outcome.records.is_empty());
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn test_missing_username_makes_no_network_calls() {
    let server = MockServer::start().await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider).run("   ").await;

    assert!(outcome.status.contains("No username provided"));
    assert!(outcome.records.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_question_set_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider).run("tester").await;

    assert_eq!(outcome.status, "Fetched questions list is empty.");
    assert!(outcome.records.is_empty());
}

#[tokio::test]
async fn test_questions_fetch_error_reported_in_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider).run("tester").await;

    assert!(outcome.status.starts_with("Error fetching questions:"));
    assert!(outcome.records.is_empty());
}

#[tokio::test]
async fn test_submission_success_status_contents() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"task_id": "t1", "question": "One?"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/files/.*"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "u", "score": 80, "correct_count": 4,
            "total_attempted": 5, "message": "ok"
        })))
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider).run("u").await;

    assert!(outcome.status.contains("80"));
    assert!(outcome.status.contains("4"));
    assert!(outcome.status.contains("5"));
    assert!(outcome.status.contains("ok"));
}

#[tokio::test]
async fn test_submission_http_error_includes_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"task_id": "t1", "question": "One?"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/files/.*"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "Invalid agent code"})),
        )
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider).run("tester").await;

    assert!(outcome.status.starts_with("Submission Failed:"));
    assert!(outcome.status.contains("422"));
    assert!(outcome.status.contains("Invalid agent code"));
    // Partial progress is never discarded.
    assert_eq!(outcome.records.len(), 1);
}

#[tokio::test]
async fn test_submission_unparseable_body_reported_as_unexpected_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"task_id": "t1", "question": "One?"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/files/.*"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    // Accepted submission, but the body is not a scoring result.
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let provider = Arc::new(ScriptedProvider::new());
    let outcome = runner(&server, provider).run("tester").await;

    assert!(outcome
        .status
        .starts_with("An unexpected error occurred during submission:"));
    // Partial progress is never discarded.
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].submitted_answer, "42");
}
