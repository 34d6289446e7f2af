//! Request handling module
//!
//! Entry point for HTTP request processing: access logging, method
//! validation, route lookup and dispatch to the page handlers.

mod index;
mod router;

pub use index::{handle_index, index_view};
pub use router::{Route, RouteKind, RouteOutcome, Router};

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;

/// Build the application route table
///
/// The root path is the only route this application defines.
#[must_use]
pub fn build_router() -> Router {
    Router::new().route(Method::GET, "/", RouteKind::Index)
}

/// Main entry point for HTTP request handling
///
/// Stateless request/response mapping: every request gets a response, so the
/// error type is `Infallible`. The request body is never consumed.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = http_version_label(req.version());
    let is_head = method == Method::HEAD;

    let response = dispatch(&method, &path, is_head, &state);

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        let mut entry = AccessLogEntry::new(peer_addr.to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate the method and dispatch through the route table
fn dispatch(
    method: &Method,
    path: &str,
    is_head: bool,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // OPTIONS is answered uniformly, before route lookup
    if *method == Method::OPTIONS {
        return http::build_options_response(state.config.http.enable_cors);
    }

    match state.router.lookup(method, path) {
        RouteOutcome::Matched(RouteKind::Index) => handle_index(state, is_head),
        RouteOutcome::MethodNotAllowed => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            http::build_405_response()
        }
        RouteOutcome::NotFound => http::build_404_response(),
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::render::Renderer;
    use http_body_util::BodyExt;

    const INDEX_TEMPLATE_BODY: &str =
        "<html><head><title>{{ title }}</title></head><body><h1>{{ title }}</h1><p>{{ msg }}</p></body></html>";

    fn test_state(templates: &[(&str, &str)]) -> Arc<AppState> {
        let mut config = Config::load_from("definitely-not-a-config-file").unwrap();
        config.logging.access_log = false;
        let renderer = Renderer::from_raw(templates.iter().copied()).unwrap();
        Arc::new(AppState::new(config, renderer, build_router()))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:54321".parse().unwrap()
    }

    fn request(method: Method, path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_root_renders_index() {
        let state = test_state(&[("index", INDEX_TEMPLATE_BODY)]);
        let resp = handle_request(request(Method::GET, "/"), peer(), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        let body = body_string(resp).await;
        assert!(body.contains("Welcome"));
        assert!(body.contains("Hello there"));
    }

    #[tokio::test]
    async fn test_repeated_gets_are_byte_identical() {
        let state = test_state(&[("index", INDEX_TEMPLATE_BODY)]);
        let first = handle_request(request(Method::GET, "/"), peer(), Arc::clone(&state))
            .await
            .unwrap();
        let second = handle_request(request(Method::GET, "/"), peer(), state)
            .await
            .unwrap();
        assert_eq!(first.status(), second.status());
        assert_eq!(body_string(first).await, body_string(second).await);
    }

    #[tokio::test]
    async fn test_head_root_has_no_body() {
        let state = test_state(&[("index", INDEX_TEMPLATE_BODY)]);
        let resp = handle_request(request(Method::HEAD, "/"), peer(), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let length: usize = resp
            .headers()
            .get("Content-Length")
            .unwrap()
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(length > 0);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state(&[("index", INDEX_TEMPLATE_BODY)]);
        let resp = handle_request(request(Method::GET, "/about"), peer(), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_post_root_is_405() {
        let state = test_state(&[("index", INDEX_TEMPLATE_BODY)]);
        let resp = handle_request(request(Method::POST, "/"), peer(), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    async fn test_options_is_204() {
        let state = test_state(&[("index", INDEX_TEMPLATE_BODY)]);
        let resp = handle_request(request(Method::OPTIONS, "/"), peer(), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
    }

    #[tokio::test]
    async fn test_missing_template_is_500_with_no_partial_body() {
        let state = test_state(&[("other", "<p>{{ title }}</p>")]);
        let resp = handle_request(request(Method::GET, "/"), peer(), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        let body = body_string(resp).await;
        assert_eq!(body, "500 Internal Server Error");
    }
}
