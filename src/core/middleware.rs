//! Request-scoped tower layers shared by every route.

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Issues time-ordered (v7) ids for requests that arrive without `x-request-id`
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Root span of a request: method, uri and the id assigned by `SetRequestIdLayer`
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

/// CORS for `CORS_ALLOWED_ORIGINS`; a `*` entry opens every origin.
/// Entries that are not valid header values are skipped.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;
    use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

    fn app(origins: &[&str]) -> Router {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        Router::new()
            .route("/health", get(|| async { StatusCode::OK }))
            .layer(cors_layer(&origins))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_generated_request_id_is_uuid_v7() {
        let request = Request::builder().body(Body::empty()).unwrap();

        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        let uuid = Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();

        assert_eq!(uuid.get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_request_id_is_generated_or_kept() {
        let response = app(&["*"])
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));

        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = app(&["*"]).oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let allowed = allowed_origin(app(&["*"]), "http://totem.local").await;

        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_origin_list() {
        let origins = ["http://totem.local", "http://kitchen.local"];

        let allowed = allowed_origin(app(&origins), "http://kitchen.local").await;
        assert_eq!(allowed.as_deref(), Some("http://kitchen.local"));

        let allowed = allowed_origin(app(&origins), "http://elsewhere.local").await;
        assert_eq!(allowed, None);
    }
}
