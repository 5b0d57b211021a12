use std::net::SocketAddr;

use anyhow::Context;

use homebase::{
    config::{AppConfig, LoggingConfig},
    db::connection,
    logging::init_tracing,
    routes::app,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            init_tracing(&LoggingConfig::default());
            return Err(err);
        }
    };
    init_tracing(&cfg.logging);

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;

    let db = connection::connect(&cfg.database).await?;
    if !cfg.weather.enabled() {
        tracing::warn!("no weather api key configured; /weather will report unavailable");
    }
    let state = AppState::new(cfg, db)?;

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
