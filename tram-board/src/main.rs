use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tram_board::board::DepartureBoard;
use tram_board::config::BoardConfig;
use tram_board::upstream::UpstreamClient;
use tram_board::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "tram_board=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the variables may come from the environment
    let dotenv_result = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Err(e) = dotenv_result {
        warn!("no .env file loaded: {e}");
    }

    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match UpstreamClient::new(config.upstream()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create upstream client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let url = client.url().to_string();
    let board = DepartureBoard::new(client, &config.stop_ref, &config.line);
    info!(
        url = %url,
        stop = board.stop(),
        line = board.line(),
        "departure board configured"
    );

    let app = create_router(AppState::new(board));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };

    info!("Tram departure board listening on http://{}", config.bind_addr);
    info!("  GET /         - departures as JSON");
    info!("  GET /as-text  - next departures as a sentence (?num=N)");
    info!("  GET /health   - health check");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
