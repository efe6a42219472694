pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::layout::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        .route("/api/v1/cv/normalize", post(handlers::handle_normalize))
        .route("/api/v1/cv/fit", post(handlers::handle_fit))
        .route("/api/v1/cv/page-limit", post(handlers::handle_page_limit))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cvfit");
    }

    #[tokio::test]
    async fn test_list_templates() {
        let request = Request::builder()
            .uri("/api/v1/templates")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["defaultTemplateId"], "minimal-clean");
        assert!(body["templates"]
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t["id"] == "harvard-classic" && t["kind"] == "harvard"));
    }

    #[tokio::test]
    async fn test_normalize_unwraps_server_shape() {
        let inner = json!({ "personalInfo": { "fullName": "A" } }).to_string();
        let (status, body) = send(post_json(
            "/api/v1/cv/normalize",
            json!({ "data": { "data": inner } }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personalInfo"]["fullName"], "A");
        assert_eq!(body["experiences"], json!([]));
    }

    #[tokio::test]
    async fn test_fit_harvard_ignores_three_pages() {
        let experiences: Vec<Value> = (0..10)
            .map(|i| json!({ "company": format!("C{i}"), "description": vec!["w"; 50].join(" ") }))
            .collect();
        let (status, body) = send(post_json(
            "/api/v1/cv/fit",
            json!({
                "document": { "experiences": experiences },
                "templateId": "harvard-classic",
                "allowThreePages": true
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["settings"]["maxPagesAllowed"], 1);
        assert_eq!(body["document"]["settings"]["showPageLimitWarning"], true);
        assert_eq!(body["document"]["experiences"].as_array().unwrap().len(), 8);
        assert_eq!(body["warning"]["code"], "harvard_one_page");
        assert_eq!(body["maxPagesLabel"], "1 page (Harvard standard)");
    }

    #[tokio::test]
    async fn test_fit_rejects_blank_template() {
        let (status, body) = send(post_json(
            "/api/v1/cv/fit",
            json!({ "document": {}, "templateId": " " }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_page_limit_reports_without_trimming() {
        let experiences: Vec<Value> = (0..7)
            .map(|_| json!({ "description": vec!["w"; 50].join(" ") }))
            .collect();
        let (status, body) = send(post_json(
            "/api/v1/cv/page-limit",
            json!({ "document": { "templateId": "minimal-clean", "experiences": experiences } }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templateId"], "minimal-clean");
        assert_eq!(body["maxPagesAllowed"], 2);
        assert_eq!(body["overLimit"], true);
        assert_eq!(body["estimate"]["estimatedPages"], 3);
        assert_eq!(body["warning"]["code"], "over_two_pages");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
