use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod render;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, honoring the configured worker count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // Explicit wiring: template collaborator, route table, listener, serve
    let renderer = render::Renderer::from_dir(&cfg.templates.dir)
        .map_err(|e| format!("Failed to load templates from '{}': {e}", cfg.templates.dir))?;
    let router = handler::build_router();

    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, renderer, router));
    let active_connections = Arc::new(AtomicUsize::new(0));

    // Connections are served on local tasks
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run(listener, state, active_connections))
        .await
}
