use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryViewStore};
use crate::routes::with_form_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_application::config::AppConfig;
use job_application::error::AppError;
use job_application::form::FormService;
use job_application::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

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

    let store = Arc::new(InMemoryViewStore::default());
    spawn_view_sweeper(store.clone(), config.form.view_ttl);
    let form_service = Arc::new(FormService::new(store, config.form.clone()));

    let app = with_form_routes(form_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        skills = config.form.skills.len(),
        "job application form ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodically unmounts views that have sat idle past `ttl`.
fn spawn_view_sweeper(store: Arc<InMemoryViewStore>, ttl: Duration) {
    let period = (ttl / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match store.evict_idle(Instant::now(), ttl) {
                Ok(0) => {}
                Ok(evicted) => debug!(evicted, "idle application views unmounted"),
                Err(err) => warn!(%err, "view sweep failed"),
            }
        }
    });
}
