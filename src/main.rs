#![forbid(unsafe_code)]

use consignacoes_mock::core::{JsonFile, MockStore, SystemClock};
use consignacoes_mock::server::{AppState, ServerConfig, build_router};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ServerConfig::from_env();
    init_tracing(config.log_json);
    match serde_json::to_string(&config) {
        Ok(settings) => info!(%settings, "configuration loaded"),
        Err(e) => warn!(error = %e, "cannot render configuration"),
    }

    let store = MockStore::open(JsonFile::new(&config.mock_data_path)).map_err(|e| {
        error!(path = %config.mock_data_path.display(), error = %e, "cannot load mock data");
        format!("cannot load mock data: {e}")
    })?;
    if store.is_empty() {
        warn!(path = %config.mock_data_path.display(), "mock data is empty; every inquiry will answer LF");
    }

    let state = AppState::new(store, SystemClock, config.api_key.as_str());
    let app = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(bind_addr.as_str())
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!(addr = %bind_addr, "consignacoes mock listening");
    info!(
        "example: GET http://localhost:{}/dados-consignacoes-empregador?codigoInscricao=1&numeroInscricao=14772711000199&competencia=202501 (header apikey)",
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
