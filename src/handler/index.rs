//! Index page handler
//!
//! The one page this application serves: `GET /` renders the `index`
//! template against a fixed two-field view model.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::render::ViewModel;

/// Template rendered for the root path
pub const INDEX_TEMPLATE: &str = "index";

/// Build the view model for the index page
///
/// Always exactly `title` then `msg`, fresh per request.
#[must_use]
pub fn index_view() -> ViewModel {
    let mut view = ViewModel::new();
    view.insert("title", "Welcome");
    view.insert("msg", "Hello there");
    view
}

/// Handle `GET /` (and `HEAD /`)
///
/// Renders the index template; a render failure is the only error path and
/// surfaces as 500 without a partial body.
pub fn handle_index(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    let view = index_view();
    match state.renderer.render_page(INDEX_TEMPLATE, &view) {
        Ok(html) => http::build_html_response(html, &state.config.http.server_name, is_head),
        Err(e) => {
            logger::log_render_error(INDEX_TEMPLATE, &e);
            http::build_500_response()
        }
    }
}
