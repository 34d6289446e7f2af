// Application state module
// Holds everything a request needs, wired explicitly at startup

use std::sync::atomic::AtomicBool;

use crate::handler::Router;
use crate::render::Renderer;

use super::types::Config;

/// Application state shared by all connections
pub struct AppState {
    pub config: Config,
    pub renderer: Renderer,
    pub router: Router,

    // Cached config value for fast access on the request path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Assemble the state from its explicitly constructed parts
    pub fn new(config: Config, renderer: Renderer, router: Router) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Self {
            config,
            renderer,
            router,
            cached_access_log,
        }
    }
}
