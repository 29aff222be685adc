//! CORS and metrics middleware.

use axum::{
    body::Body,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS,
            ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
        },
        HeaderValue, Method, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

use super::rpc::query_payload;
use crate::metrics::{
    operation_label, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION,
};

/// Methods advertised in answer to a preflight request.
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, PATCH";

/// Metrics middleware that tracks HTTP request duration and counts.
///
/// This middleware records:
/// - Request duration (histogram)
/// - Request count (counter)
/// - Requests in flight (gauge)
///
/// Requests are labelled with the RPC operation named in the query string.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let query = query_payload(request.uri());
    let operation = operation_label(query.get("method").and_then(|v| v.as_str()));

    HTTP_REQUESTS_IN_FLIGHT.inc();

    let response = next.run(request).await;

    HTTP_REQUESTS_IN_FLIGHT.dec();

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[operation, status.as_str()])
        .observe(duration);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[operation, status.as_str()])
        .inc();

    response
}

/// Cross-origin negotiation.
///
/// Requests without an `Origin` header pass through untouched. Other
/// requests get `Access-Control-Allow-Origin: *`. An `OPTIONS` preflight
/// carrying `Access-Control-Request-Method` is answered directly with 204,
/// the allowed methods and an echo of the requested headers; an `OPTIONS`
/// without it is answered with a bare 404.
pub async fn cors_middleware(request: Request<Body>, next: Next) -> Response {
    if !request.headers().contains_key(ORIGIN) {
        return next.run(request).await;
    }

    if request.method() != Method::OPTIONS {
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        return response;
    }

    if !request.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    if let Some(requested) = request.headers().get(ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::any, Router};
    use tower::ServiceExt;

    async fn dummy_handler() -> &'static str {
        "OK"
    }

    fn cors_app() -> Router {
        Router::new()
            .route("/", any(dummy_handler))
            .layer(middleware::from_fn(cors_middleware))
    }

    #[tokio::test]
    async fn test_no_origin_passes_through() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = cors_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_origin_adds_allow_origin() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(ORIGIN, "http://localhost:8080")
            .body(Body::empty())
            .unwrap();

        let response = cors_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_preflight_echoes_requested_headers() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/")
            .header(ORIGIN, "http://localhost:8080")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "content-type, x-trace")
            .body(Body::empty())
            .unwrap();

        let response = cors_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "content-type, x-trace");
    }

    #[tokio::test]
    async fn test_preflight_without_requested_headers() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/")
            .header(ORIGIN, "http://localhost:8080")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap();

        let response = cors_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_HEADERS)
            .is_none());
    }

    #[tokio::test]
    async fn test_options_without_request_method_is_404() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/")
            .header(ORIGIN, "http://localhost:8080")
            .body(Body::empty())
            .unwrap();

        let response = cors_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_middleware_counts_requests() {
        let app = Router::new()
            .route("/", any(dummy_handler))
            .layer(middleware::from_fn(metrics_middleware));

        let before = HTTP_REQUESTS_TOTAL
            .with_label_values(&["editTicket", "200"])
            .get();

        let request = Request::builder()
            .uri("/?method=editTicket")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let after = HTTP_REQUESTS_TOTAL
            .with_label_values(&["editTicket", "200"])
            .get();
        assert_eq!(after, before + 1);
    }
}
