//! Rotas HTTP e mapeamento de erros para respostas.

use std::time::Instant;

use askama::Template;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use nlp_core::corpus::demo_texts;
use nlp_core::{pipeline, validate_text, AnalysisError, AnalysisResult, EntityCategory};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::state::AppState;
use crate::stream;

pub const ROOT_MESSAGE: &str =
    "NLP Analysis API is running. Use the /analyze or /analyze-stream endpoints.";

/// Corpo das requisições de análise.
#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

/// Erro de handler, serializado como `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    /// Corpo ausente, JSON malformado ou sem o campo `text`.
    Payload(JsonRejection),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError::Analysis(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Payload(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Analysis(err) => {
                let status = match &err {
                    AnalysisError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
                    AnalysisError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                    AnalysisError::AnalysisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    error!(error = %err, "análise falhou");
                }
                (status, err.to_string())
            }
            ApiError::Payload(rejection) => {
                warn!(error = %rejection, "corpo da requisição rejeitado");
                (rejection.status(), rejection.body_text())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// CORS: lista vazia libera qualquer origem.
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/analyze", post(analyze_text))
        .route("/analyze-stream", post(analyze_text_stream))
        .route("/demo", get(demo_page))
        .route("/demo-texts", get(demo_texts_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(input) = payload?;
    validate_text(&input.text)?;
    let model = state.holder.get().await.ok_or(AnalysisError::ModelUnavailable)?;

    let started = Instant::now();
    let chars = input.text.chars().count();
    let result = tokio::task::spawn_blocking(move || pipeline::analyze(model.as_ref(), &input.text))
        .await
        .map_err(|e| AnalysisError::AnalysisFailed(e.to_string()))??;

    info!(
        chars,
        tokens = result.tokens.len(),
        entities = result.entities.len(),
        sentences = result.sentences.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "texto analisado"
    );
    Ok(Json(result))
}

async fn analyze_text_stream(
    State(state): State<AppState>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(input) = payload?;
    validate_text(&input.text)?;
    Ok(stream::ndjson_response(state.holder.clone(), input.text))
}

async fn demo_texts_handler() -> Json<Vec<Value>> {
    Json(
        demo_texts()
            .into_iter()
            .map(|(domain, text)| json!({ "domain": domain, "text": text }))
            .collect(),
    )
}

struct CategoryChip {
    name: &'static str,
    color: &'static str,
}

#[derive(Template)]
#[template(path = "demo.html")]
struct DemoTemplate {
    model: String,
    available: bool,
    failure: Option<String>,
    categories: Vec<CategoryChip>,
}

async fn demo_page(State(state): State<AppState>) -> Html<String> {
    let template = DemoTemplate {
        model: state.holder.identifier().to_string(),
        available: state.holder.get().await.is_some(),
        failure: state.holder.failure().await,
        categories: EntityCategory::ALL
            .iter()
            .map(|c| CategoryChip { name: c.name(), color: c.color() })
            .collect(),
    };
    Html(template.render().unwrap_or_else(|e| format!("Template error: {}", e)))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request};
    use nlp_core::{AnnotationModel, Doc, EnglishModel, ModelError, Span, TokenAnnotation};
    use tower::ServiceExt;

    use super::*;
    use crate::state::ModelHolder;

    /// "Alice sees Bob": três tokens, uma entidade.
    struct FakeModel {
        head_of_last: usize,
    }

    fn token(text: &str, start: usize, head: usize, ent: Option<&str>) -> TokenAnnotation {
        TokenAnnotation {
            text: text.into(),
            start,
            pos: "X".into(),
            tag: "XX".into(),
            dep: "dep".into(),
            head,
            shape: "Xxxx".into(),
            lemma: text.to_lowercase(),
            is_alpha: true,
            is_stop: false,
            is_punct: false,
            ent_type: ent.map(String::from),
            morph: BTreeMap::new(),
        }
    }

    impl AnnotationModel for FakeModel {
        fn name(&self) -> &str {
            "fake"
        }

        fn pipe(&self, texts: &[&str]) -> Result<Vec<Doc>, ModelError> {
            let text = texts[0];
            Ok(vec![Doc {
                text: text.into(),
                tokens: vec![
                    token("Alice", 0, 1, Some("PERSON")),
                    token("sees", 6, 1, None),
                    token("Bob", 11, self.head_of_last, None),
                ],
                sents: vec![Span {
                    text: text.into(),
                    start_token: 0,
                    end_token: 3,
                    start: 0,
                    end: 14,
                    label: None,
                }],
                ents: vec![Span {
                    text: "Alice".into(),
                    start_token: 0,
                    end_token: 1,
                    start: 0,
                    end: 5,
                    label: Some("PERSON".into()),
                }],
            }])
        }
    }

    struct PanickingModel;

    impl AnnotationModel for PanickingModel {
        fn name(&self) -> &str {
            "panicking"
        }

        fn pipe(&self, _texts: &[&str]) -> Result<Vec<Doc>, ModelError> {
            panic!("model crashed")
        }
    }

    fn app_with(model: Arc<dyn AnnotationModel>) -> Router {
        let state = AppState::new(Arc::new(ModelHolder::preloaded(model)));
        create_router(state, cors_layer(&[]).unwrap())
    }

    async fn app_without_model() -> Router {
        let holder = ModelHolder::new("en_core_web_trf");
        assert!(!holder.load().await);
        create_router(AppState::new(Arc::new(holder)), cors_layer(&[]).unwrap())
    }

    async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn detail(body: &str) -> String {
        let json: Value = serde_json::from_str(body).unwrap();
        json["detail"].as_str().unwrap().to_string()
    }

    fn lines(body: &str) -> Vec<Value> {
        body.lines().map(|l| serde_json::from_str(l).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_root_message() {
        let (status, body) = get_body(app_with(Arc::new(FakeModel { head_of_last: 1 })), "/").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json,
            json!({ "message": "NLP Analysis API is running. Use the /analyze or /analyze-stream endpoints." })
        );
    }

    #[tokio::test]
    async fn test_analyze_with_fake_model() {
        let app = app_with(Arc::new(FakeModel { head_of_last: 1 }));
        let (status, _, body) = post(app, "/analyze", r#"{"text":"Alice sees Bob"}"#).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["tokens"].as_array().unwrap().len(), 3);
        assert_eq!(json["tokens"][0]["head"], "sees");
        assert_eq!(json["tokens"][0]["is_entity"], true);
        assert_eq!(json["tokens"][1]["entity_type"], Value::Null);
        assert_eq!(json["tokens"][2]["start"], 11);
        assert_eq!(json["tokens"][2]["end"], 14);
        assert_eq!(json["entities"], json!([{ "text": "Alice", "start": 0, "end": 5, "label": "PERSON" }]));
        assert_eq!(json["sentences"], json!([{ "text": "Alice sees Bob", "start": 0, "end": 14 }]));
    }

    #[tokio::test]
    async fn test_analyze_with_builtin_model() {
        let app = app_with(Arc::new(EnglishModel::build()));
        let (status, _, body) = post(
            app,
            "/analyze",
            r#"{"text":"Apple is looking at buying U.K. startup for $1 billion."}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let result: AnalysisResult = serde_json::from_str(&body).unwrap();
        assert_eq!(result.tokens.len(), 12);
        assert_eq!(result.entities[0].text, "Apple");
        assert_eq!(result.entities[0].label, "ORG");
        assert_eq!(result.sentences.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_model_check() {
        for uri in ["/analyze", "/analyze-stream"] {
            let (status, _, body) = post(app_without_model().await, uri, r#"{"text":"   "}"#).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert_eq!(detail(&body), "Input text cannot be empty.");
        }
    }

    #[tokio::test]
    async fn test_missing_text_field_is_rejected() {
        let app = app_with(Arc::new(FakeModel { head_of_last: 1 }));
        let (status, _, body) = post(app, "/analyze", r#"{"content":"hi"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!detail(&body).is_empty());
    }

    #[tokio::test]
    async fn test_body_rejections_keep_extractor_status() {
        let app = || app_with(Arc::new(FakeModel { head_of_last: 1 }));

        let (status, _, body) = post(app(), "/analyze", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!detail(&body).is_empty());

        let (status, _, body) = post(app(), "/analyze-stream", r#"{"text": 42}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!detail(&body).is_empty());

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from(r#"{"text":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_analyze_without_model_is_503() {
        let (status, _, body) = post(app_without_model().await, "/analyze", r#"{"text":"Hello"}"#).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(detail(&body), "NLP model is not available.");
    }

    #[tokio::test]
    async fn test_stream_without_model_emits_error_line() {
        let (status, content_type, body) =
            post(app_without_model().await, "/analyze-stream", r#"{"text":"Hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some(stream::NDJSON));
        assert_eq!(lines(&body), vec![json!({ "error": "NLP model is not available." })]);
    }

    #[tokio::test]
    async fn test_stream_emits_tokens_then_entities() {
        let app = app_with(Arc::new(FakeModel { head_of_last: 1 }));
        let (status, _, body) = post(app, "/analyze-stream", r#"{"text":"Alice sees Bob"}"#).await;
        assert_eq!(status, StatusCode::OK);

        let lines = lines(&body);
        let types: Vec<&str> = lines.iter().map(|l| l["type"].as_str().unwrap()).collect();
        assert_eq!(types, ["token", "token", "token", "entity"]);
        assert_eq!(lines[0]["data"]["text"], "Alice");
        assert_eq!(lines[3]["data"], json!({ "text": "Alice", "start": 0, "end": 5, "label": "PERSON" }));
    }

    #[tokio::test]
    async fn test_projection_failure() {
        let broken = || Arc::new(FakeModel { head_of_last: 42 });

        let (status, _, body) = post(app_with(broken()), "/analyze", r#"{"text":"Alice sees Bob"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(detail(&body).starts_with("An error occurred during text analysis:"));

        // No modo incremental, as linhas já enviadas ficam e um erro fecha o corpo
        let (status, _, body) =
            post(app_with(broken()), "/analyze-stream", r#"{"text":"Alice sees Bob"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let lines = lines(&body);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "token");
        assert_eq!(lines[1]["type"], "token");
        assert!(lines[2]["error"]
            .as_str()
            .unwrap()
            .contains("token 2 points to missing head 42"));
    }

    #[tokio::test]
    async fn test_model_panic_is_500() {
        let (status, _, body) =
            post(app_with(Arc::new(PanickingModel)), "/analyze", r#"{"text":"boom"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(detail(&body).starts_with("An error occurred during text analysis:"));
    }

    #[tokio::test]
    async fn test_demo_texts() {
        let (status, body) = get_body(app_with(Arc::new(FakeModel { head_of_last: 1 })), "/demo-texts").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        let texts = json.as_array().unwrap();
        assert_eq!(texts.len(), demo_texts().len());
        assert_eq!(texts[0]["domain"], "Business");
    }

    #[tokio::test]
    async fn test_demo_page() {
        let (status, body) = get_body(app_with(Arc::new(EnglishModel::build())), "/demo").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("en_core_web_rules"));
        assert!(body.contains("PERSON"));
        assert!(!body.starts_with("Template error"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let app = app_with(Arc::new(FakeModel { head_of_last: 1 }));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "http://elsewhere.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer(&["http://ok.test".into()]).is_ok());
        assert!(cors_layer(&["bad\norigin".into()]).is_err());
    }
}
