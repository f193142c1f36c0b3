use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryOperatorRepository};
use crate::routes::with_oversight_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rbs_engine::config::AppConfig;
use rbs_engine::error::AppError;
use rbs_engine::oversight::{OversightService, ScoringConfig};
use rbs_engine::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryOperatorRepository::default());
    let service = Arc::new(OversightService::new(repository, ScoringConfig::default()));

    let app = with_oversight_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "surveillance oversight service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
