use crate::cli::ServeArgs;
use crate::infra::{scoring_policy, AppState, InMemoryCustomerStore, InMemoryLoanStore};
use crate::routes::with_lending_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use credit_engine::config::AppConfig;
use credit_engine::error::AppError;
use credit_engine::lending::LendingService;
use credit_engine::telemetry;

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

    let customers = Arc::new(InMemoryCustomerStore::default());
    let loans = Arc::new(InMemoryLoanStore::default());
    let service = Arc::new(LendingService::new(
        customers,
        loans,
        scoring_policy(&config.lending),
    ));

    let app = with_lending_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
