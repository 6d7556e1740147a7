use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use departures_server::config::ServerConfig;
use departures_server::upstream::UpstreamClient;
use departures_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "departures_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let upstream = match UpstreamClient::new(config.upstream.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create upstream client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(AppState::new(upstream));

    // Binding is the only fatal failure once configuration is valid
    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        addr = %config.bind_addr,
        upstream = %config.upstream.url_template,
        "departures server listening"
    );
    info!("  GET /departures?siteId=<id>[&lineId=<int>][&direction=<text>]");
    info!("  GET /departures/json?siteId=<id>[&lineId=<int>][&direction=<text>]");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
