use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ghost_llm::{LLMClient, LLMService};
use ghost_post_engine::{
    app_module::{AppService, AppState},
    app_router::application,
    error::HistoryError,
    history::{
        history_service::HistoryService,
        history_store::{HistoryEntry, HistoryStore, MemoryHistoryStore},
    },
};
use serde_json::{json, Value};
use tower::ServiceExt;

const WELL_FORMED_REPLY: &str = r#"{
  "title": "AI and hiring",
  "posts": [
    "Hiring is changing faster than most teams notice.",
    "Three things AI will never replace in an interview.",
    "If your hiring process fits in a prompt, rethink it."
  ]
}"#;

struct FakeGemini {
    reply: anyhow::Result<String, String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LLMService for FakeGemini {
    async fn generate_content(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(|e| anyhow::anyhow!(e))
    }

    fn model(&self) -> &str {
        "fake-gemini"
    }
}

struct TestApp {
    router: Router,
    prompts: Arc<Mutex<Vec<String>>>,
    store: Arc<MemoryHistoryStore>,
}

fn test_app(reply: Option<Result<&str, &str>>) -> TestApp {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let llm_client = reply.map(|reply| {
        LLMClient::from_service(Box::new(FakeGemini {
            reply: reply.map(str::to_string).map_err(str::to_string),
            prompts: prompts.clone(),
        }))
    });

    let store = Arc::new(MemoryHistoryStore::new());
    let service = AppService::new(llm_client, HistoryService::new(store.clone())).unwrap();
    let router = application(AppState::new(service), Duration::from_secs(5));

    TestApp {
        router,
        prompts,
        store,
    }
}

async fn post_generate(router: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn wait_for_history(store: &MemoryHistoryStore, expected: usize) -> Vec<HistoryEntry> {
    for _ in 0..50 {
        let entries = store.recent(20).await.unwrap();
        if entries.len() >= expected {
            return entries;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    store.recent(20).await.unwrap()
}

#[tokio::test]
async fn linkedin_is_the_default_platform() {
    let app = test_app(Some(Ok(WELL_FORMED_REPLY)));

    let (status, body) = post_generate(
        app.router,
        json!({"content": "AI is changing hiring", "vibe": "Professional"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"].as_array().unwrap().len(), 3);
    assert_eq!(body["title"], "AI and hiring");

    let prompts = app.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("You are a LinkedIn content expert"));
    assert!(prompts[0].contains("AI is changing hiring"));
}

#[tokio::test]
async fn empty_content_is_a_bad_request() {
    let app = test_app(Some(Ok(WELL_FORMED_REPLY)));

    let (status, body) =
        post_generate(app.router, json!({"content": "", "vibe": "Funny"}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Both 'content' and 'vibe' are required."}));
    assert!(app.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unparsable_body_is_a_bad_request() {
    let app = test_app(Some(Ok(WELL_FORMED_REPLY)));

    let (status, body) = post_generate(app.router, "{\"content\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request body."}));
}

#[tokio::test]
async fn missing_credential_fails_before_anything_else() {
    let app = test_app(None);

    let (status, body) = post_generate(
        app.router.clone(),
        json!({"content": "AI is changing hiring", "vibe": "Professional"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Missing GEMINI_API_KEY environment variable."}));

    // Even an invalid body gets the configuration error.
    let (status, body) = post_generate(app.router, "not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Missing GEMINI_API_KEY environment variable."}));
}

#[tokio::test]
async fn fenced_twitter_reply_is_normalized() {
    let reply = format!("```json\n{}\n```", WELL_FORMED_REPLY);
    let app = test_app(Some(Ok(reply.as_str())));

    let (status, body) = post_generate(
        app.router,
        json!({"content": "remote work is overrated", "vibe": "Crazy", "platform": "twitter"})
            .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"].as_array().unwrap().len(), 3);
    assert!(app.prompts.lock().unwrap()[0].contains("280 characters or fewer"));

    let entries = wait_for_history(&app.store, 1).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].topic, "(Twitter) AI and hiring");
    assert_eq!(entries[0].tone, "Crazy");
}

#[tokio::test]
async fn prose_reply_collapses_to_generic_error() {
    let app = test_app(Some(Ok("Here are your posts! Hope you like them.")));

    let (status, body) = post_generate(
        app.router,
        json!({"content": "notes", "vibe": "Funny"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Something went wrong generating your posts. Please try again."})
    );
    assert!(app.store.recent(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failure_collapses_to_generic_error() {
    let app = test_app(Some(Err("429 Too Many Requests")));

    let (status, body) = post_generate(
        app.router,
        json!({"content": "notes", "vibe": "Funny"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Something went wrong generating your posts. Please try again."})
    );
}

#[tokio::test]
async fn reply_without_posts_is_rejected() {
    let app = test_app(Some(Ok(r#"{"title": "No posts here"}"#)));

    let (status, _) = post_generate(
        app.router,
        json!({"content": "notes", "vibe": "Funny"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

struct SlowGemini {
    delay: Duration,
}

#[async_trait]
impl LLMService for SlowGemini {
    async fn generate_content(&self, _prompt: &str) -> anyhow::Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(WELL_FORMED_REPLY.to_string())
    }

    fn model(&self) -> &str {
        "slow-gemini"
    }
}

#[tokio::test]
async fn slow_model_call_collapses_to_generic_error() {
    let llm_client = LLMClient::from_service(Box::new(SlowGemini {
        delay: Duration::from_millis(300),
    }));
    let service = AppService::new(Some(llm_client), HistoryService::disabled()).unwrap();
    let router = application(AppState::new(service), Duration::from_millis(50));

    let (status, body) = post_generate(
        router,
        json!({"content": "x", "vibe": "Funny"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Something went wrong generating your posts. Please try again."})
    );
}

struct ReadOnlyStore;

#[async_trait]
impl HistoryStore for ReadOnlyStore {
    async fn append(&self, _entry: HistoryEntry) -> Result<(), HistoryError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(Vec::new())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        Ok(())
    }
}

#[tokio::test]
async fn failing_history_store_keeps_the_success_response() {
    let llm_client = LLMClient::from_service(Box::new(FakeGemini {
        reply: Ok(WELL_FORMED_REPLY.to_string()),
        prompts: Arc::new(Mutex::new(Vec::new())),
    }));
    let service =
        AppService::new(Some(llm_client), HistoryService::new(Arc::new(ReadOnlyStore))).unwrap();
    let router = application(AppState::new(service), Duration::from_secs(5));

    let (status, body) = post_generate(
        router,
        json!({"content": "AI is changing hiring", "vibe": "Professional"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"].as_array().unwrap().len(), 3);
    assert_eq!(body["title"], "AI and hiring");
}
