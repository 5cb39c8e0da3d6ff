use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use notam_server::config::AppConfig;
use notam_server::flights::RouteTable;
use notam_server::notam::{MockNoticeSource, NotamClient, NoticeExtractor};
use notam_server::pipeline::Pipeline;
use notam_server::web::{AppState, create_router};

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "notam_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Load the flight table (fail fast if unusable)
    let routes = match &config.flight_table {
        Some(path) => RouteTable::load(path)?,
        None => RouteTable::builtin()?,
    };
    info!(flights = routes.len(), "loaded flight table");

    info!(
        open = config.boundary.open_pattern(),
        close = config.boundary.close_pattern(),
        "notice section boundary"
    );
    let extractor = NoticeExtractor::new(config.boundary.clone());

    // Serve pages from disk in mock mode, otherwise fetch through the relay
    let pipeline = match &config.mock_dir {
        Some(dir) => {
            let source = MockNoticeSource::load(dir)?;
            info!(?dir, airports = source.available_airports().len(), "using mock notices");
            Pipeline::new(routes, source)
        }
        None => {
            info!(
                source = %config.notam.source_base,
                relay = %config.notam.relay_prefix,
                timeout_secs = config.notam.timeout_secs,
                "fetching live notices"
            );
            Pipeline::new(routes, NotamClient::new(config.notam.clone())?)
        }
    }
    .with_extractor(extractor);

    info!(
        idle_secs = config.sessions.idle_ttl.as_secs(),
        max = config.sessions.max_sessions,
        "session limits"
    );
    let app = create_router(AppState::new(pipeline, &config.sessions));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("NOTAM lookup listening on http://{}", config.bind_addr);
    info!("  GET  /health                   - Health check");
    info!("  GET  /api/flights/:flight      - Flight route");
    info!("  GET  /api/notams?flight=       - Look up notices");
    info!("  POST /api/sessions/:id/search  - Search within a session");
    info!("  GET  /api/sessions/:id         - Session state");

    axum::serve(listener, app).await?;
    Ok(())
}
