use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicantRepository, InMemoryEmployerRepository, InMemorySynthesizer,
    UnconfiguredTranscriber,
};
use crate::routes::service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use mason_ivr::config::AppConfig;
use mason_ivr::dialogue::{DialogueEngine, IvrState};
use mason_ivr::employers::EmployerDirectory;
use mason_ivr::error::AppError;
use mason_ivr::telemetry;
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

    let records = Arc::new(InMemoryApplicantRepository::default());
    let ivr_state = Arc::new(IvrState {
        engine: Arc::new(DialogueEngine::new(config.sessions)),
        transcriber: Arc::new(UnconfiguredTranscriber),
        synthesizer: Arc::new(InMemorySynthesizer::default()),
        records: records.clone(),
    });
    let employers = Arc::new(EmployerDirectory::new(Arc::new(
        InMemoryEmployerRepository::default(),
    )));

    let app = service_routes(ivr_state, records, employers)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mason ivr service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
