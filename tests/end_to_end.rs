//! End-to-end tests
//!
//! The whole stack, from configuration to persisted saved strategies, against
//! a mock generation endpoint.

use marketing_compass::app_state::{ShellAction, View};
use marketing_compass::{AppConfig, StoreBackend};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn answer(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": value.to_string() }] }
        }]
    }))
}

fn keyword(text: &str) -> Value {
    json!({
        "keyword": text,
        "volume": "High",
        "intent": "Transactional",
        "cpc": "8.000 - 12.000",
        "competition": "High",
        "semrushLink": ""
    })
}

fn strategy(pillar: &str) -> Value {
    json!({
        "keywordUserIntents": [
            { "intent": "Transactional", "description": "d", "exampleQueries": ["q"] }
        ],
        "aiOverviewIntro": "intro",
        "aiOverviewContent": ["c"],
        "aiOverviewSchema": ["s"],
        "aiOverviewEEAT": ["e"],
        "contentPillars": [{
            "pillarTitle": pillar,
            "pillarDescription": "pd",
            "contentAngle": "ca",
            "clusterTopics": []
        }],
        "competitorAnalysis": []
    })
}

fn config(server: &MockServer, dir: &TempDir, store: StoreBackend) -> AppConfig {
    let mut config = AppConfig::from_lookup(|var| match var {
        "API_KEY" => Some("e2e-key".to_string()),
        "GEMINI_MODEL" => Some("gemini-test".to_string()),
        _ => None,
    })
    .unwrap()
    .with_data_dir(dir.path())
    .with_store(store);
    config.client = config.client.with_base_url(server.uri());
    config
}

/// Detail and strategy prompts also mention the keyword, so their mocks take priority
async fn mount_keyword_flow(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "e2e-key"))
        .and(body_string_contains("vay mua xe"))
        .respond_with(answer(json!([keyword("vay mua xe máy trả góp")])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string_contains("cpcBreakdown"))
        .respond_with(answer(json!({
            "intentExplanation": "Muốn mua xe trả góp.",
            "cpcBreakdown": { "lowRangeVND": "8.000", "highRangeVND": "12.000", "notes": "n" },
            "relatedKeywords": ["a", "b", "c", "d", "e"],
            "commonQuestions": ["q1", "q2", "q3"]
        })))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string_contains("contentPillars"))
        .respond_with(answer(strategy("Hướng dẫn vay mua xe")))
        .with_priority(1)
        .mount(server)
        .await;
}

async fn discover_select_generate(config: &AppConfig) -> std::sync::Arc<marketing_compass::app_state::Shell> {
    let shell = config.build_shell().await.unwrap();

    shell.set_search_term("vay mua xe");
    assert!(shell.discover_keywords().await.unwrap().is_applied());

    let found = shell
        .read(|s| s.explorer().categorized().find("vay mua xe máy trả góp").cloned())
        .unwrap();
    shell
        .dispatch(ShellAction::SelectKeyword(found))
        .await
        .unwrap();
    shell.generate_strategy().await.unwrap();
    shell
}

#[tokio::test]
async fn test_full_flow_with_file_store() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_keyword_flow(&server).await;
    let config = config(&server, &dir, StoreBackend::File);

    {
        let shell = discover_select_generate(&config).await;

        let state = shell.snapshot();
        assert_eq!(state.view(), View::Strategy);
        assert!(state.focus().details().is_some());
        assert!(state.can_save());

        let export = state.export_strategy().unwrap();
        assert_eq!(export.file_name, "content-strategy-vay_mua_xe_m_y_tr__g_p.txt");
        assert!(export.contents.contains("Hướng dẫn vay mua xe"));

        shell.dispatch(ShellAction::SaveStrategy).await.unwrap();
    }

    assert!(dir.path().join("savedStrategies.json").exists());

    // A fresh shell over the same directory sees the saved strategy
    let shell = config.build_shell().await.unwrap();
    let saved = shell.read(|s| s.saved_strategies().to_vec());
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].keyword, "vay mua xe máy trả góp");
    assert_eq!(saved[0].strategy.first_pillar_title(), Some("Hướng dẫn vay mua xe"));

    shell
        .dispatch(ShellAction::DeleteStrategy(saved[0].id.clone()))
        .await
        .unwrap();
    let reopened = config.build_shell().await.unwrap();
    assert!(reopened.read(|s| s.saved_strategies().is_empty()));
}

#[tokio::test]
async fn test_full_flow_with_kv_store() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_keyword_flow(&server).await;
    let config = config(&server, &dir, StoreBackend::Kv);

    let shell = discover_select_generate(&config).await;
    shell.dispatch(ShellAction::SaveStrategy).await.unwrap();

    assert!(matches!(
        shell.dispatch(ShellAction::SaveStrategy).await,
        Err(marketing_compass::app_state::ShellError::AlreadySaved)
    ));
    assert_eq!(shell.read(|s| s.saved_strategies().len()), 1);
}

#[tokio::test]
async fn test_service_outage_stays_local() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Internal error", "status": "INTERNAL" }
        })))
        .mount(&server)
        .await;
    let shell = config(&server, &dir, StoreBackend::Memory)
        .build_shell()
        .await
        .unwrap();

    shell.set_search_term("vay");
    shell.discover_keywords().await.unwrap();
    shell.fetch_keywords().await.unwrap();
    shell.estimate_metrics().await.unwrap();

    let state = shell.snapshot();
    assert_eq!(
        state.explorer().error(),
        Some("Failed to fetch keywords. Please try again.")
    );
    assert_eq!(
        state.metrics().error(),
        Some("Failed to estimate metrics. Please try again.")
    );
    assert!(state.imc().error().is_none());
    assert!(!state.explorer().is_busy());
}

#[tokio::test]
async fn test_discover_outage_message() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let shell = config(&server, &dir, StoreBackend::Memory)
        .build_shell()
        .await
        .unwrap();

    shell.set_search_term("vay");
    shell.discover_keywords().await.unwrap();

    assert_eq!(
        shell.read(|s| s.explorer().error().map(str::to_string)),
        Some(
            "An internal error occurred with the AI service. \
             Please try a different search term or try again later."
                .to_string()
        )
    );
}

#[test]
fn test_missing_api_key_refuses_start() {
    let result = AppConfig::from_lookup(|_| None);
    assert!(matches!(
        result,
        Err(marketing_compass::ConfigError::MissingApiKey)
    ));
}
