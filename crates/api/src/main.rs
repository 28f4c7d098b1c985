use anyhow::Context;

use ecotrace_api::{app, settings::Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ecotrace_observability::init();

    let settings = Settings::from_env()?;
    let state = app::AppState::from_settings(&settings)?;
    let app = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
