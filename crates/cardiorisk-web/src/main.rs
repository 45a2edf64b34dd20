use anyhow::Context;
use cardiorisk_report::ReportWriter;
use cardiorisk_web::{AppState, Config, router};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("cardiorisk v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::parse();

    let model = cardiorisk_ai::load_model(&config.model)
        .with_context(|| format!("loading model from {}", config.model.display()))?;
    let schema = config
        .schema(model.feature_names())
        .context("building feature schema")?;
    let reports = ReportWriter::new(config.report_path.clone(), config.report_font());
    let state = AppState::new(model, schema, reports)
        .with_context(|| format!("model {} rejects the feature schema", config.model.display()))?;

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
