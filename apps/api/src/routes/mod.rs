pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/evaluate", post(handlers::handle_evaluate_upload))
        .route("/api/v1/evaluate/text", post(handlers::handle_evaluate_text))
        .route("/api/v1/jd/structure", post(handlers::handle_structure_jd))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::embedding::HashEmbedder;
    use crate::evaluation::pipeline::Evaluator;
    use crate::evaluation::scoring::{CompositeScorer, WeightConfig};
    use crate::suggestions::DisabledSuggestions;

    const LIMIT: usize = 1024 * 1024;

    fn app() -> Router {
        let scorer = CompositeScorer::new(WeightConfig::default(), Arc::new(HashEmbedder::default()));
        let evaluator = Evaluator::new(scorer, Arc::new(DisabledSuggestions));
        build_router(
            AppState {
                evaluator: Arc::new(evaluator),
            },
            LIMIT,
        )
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), LIMIT).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_evaluate_text_returns_verdict() {
        let request = json_request(
            "/api/v1/evaluate/text",
            json!({
                "jd_text": "Backend Engineer\nRequirements:\n- Rust\n- PostgreSQL",
                "resume_text": "Summary\nBackend engineer\nSkills\nRust\nPostgreSQL"
            }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["jd_title"], "Backend Engineer");
        assert_eq!(body["must_have_score"], 1.0);
        assert!(["High", "Medium", "Low"].contains(&body["verdict"].as_str().unwrap()));
        assert!(body["suggestions"]["error"].is_string());
    }

    #[tokio::test]
    async fn test_evaluate_text_rejects_empty_resume() {
        let request = json_request(
            "/api/v1/evaluate/text",
            json!({ "jd_text": "Data Analyst", "resume_text": "   " }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_structure_jd_preview() {
        let request = json_request(
            "/api/v1/jd/structure",
            json!({ "jd_text": "ML Scientist\nRequirements:\n- PyTorch\n- 3+ years research\nPreferred Qualifications:\n- MSc" }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["requirements"]["title"], "ML Scientist");
        assert_eq!(body["requirements"]["must_have"], json!(["PyTorch", "3+ years research"]));
        assert_eq!(body["requirements"]["nice_to_have"], json!(["MSc"]));
        assert_eq!(body["requirements"]["years_required"], 3);
        assert_eq!(body["sections"]["preferred_qualifications"], "- MSc");
    }

    #[tokio::test]
    async fn test_multipart_upload_evaluates_text_files() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"jd_file\"; filename=\"jd.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nData Analyst\nRequirements:\n- SQL\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"resume_file\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nSkills\nSQL reporting\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/evaluate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["resume_filename"], "cv.txt");
        assert_eq!(body["must_have_score"], 1.0);
    }

    #[tokio::test]
    async fn test_multipart_without_resume_is_rejected() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"jd_file\"; filename=\"jd.txt\"\r\n\r\nEngineer\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/evaluate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn multipart_request(parts: &[(&str, &str, &[u8])]) -> Request<Body> {
        let boundary = "XBOUNDARY";
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/evaluate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_docx_upload_is_evaluated() {
        let jd = crate::extraction::docx::build_docx(&[
            "Platform Engineer",
            "Requirements:",
            "- Kubernetes",
            "- Terraform",
        ]);
        let request = multipart_request(&[
            ("jd_file", "jd.docx", jd.as_slice()),
            ("resume_file", "cv.txt", &b"Skills\nKubernetes operators"[..]),
        ]);

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["jd_title"], "Platform Engineer");
        assert_eq!(body["must_have_score"], 0.5);
        assert_eq!(body["missing_must_have"], json!(["Terraform"]));
    }

    #[tokio::test]
    async fn test_corrupt_docx_upload_is_unprocessable() {
        let request = multipart_request(&[
            ("jd_file", "jd.docx", &b"PK"[..]),
            ("resume_file", "cv.txt", &b"Skills\nSQL"[..]),
        ]);

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"]["code"], "EXTRACTION_FAILED");
    }
}
