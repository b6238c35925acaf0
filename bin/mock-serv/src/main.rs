use axum::{Router, routing::get};
use cherry_api::{ApiConfig, tracing::init_tracing};
use cherry_mock::{MockConfig, MockState, metrics};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_config = ApiConfig::from_env()?;
    init_tracing(api_config.env);

    let config = MockConfig::from_env()?;
    let state = if config.seed {
        MockState::seeded()
    } else {
        MockState::new()
    };

    let handle = metrics::init_metrics()?;
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(handle);

    let app = cherry_mock::router(state)
        .merge(metrics_routes)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        "Mock users API running on http://{}/users",
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;

    Ok(())
}
