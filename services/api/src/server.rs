use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryCityRepository, InMemoryLeadRelay, InMemoryPropertyRepository,
};
use crate::routes::with_platform_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use listing_search::catalog::{sample_cities, PropertyCsvImporter};
use listing_search::config::AppConfig;
use listing_search::error::AppError;
use listing_search::leads::LeadService;
use listing_search::listings::ListingService;
use listing_search::telemetry;
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

    let properties = match args.catalog_csv.take() {
        Some(path) => {
            let seeded = PropertyCsvImporter::from_path(&path)?;
            info!(path = %path.display(), listings = seeded.len(), "listing store seeded");
            InMemoryPropertyRepository::seeded(seeded)
        }
        None => InMemoryPropertyRepository::default(),
    };
    let cities = InMemoryCityRepository::seeded(sample_cities());

    let listing_service = Arc::new(ListingService::new(
        Arc::new(properties),
        Arc::new(cities),
        &config.search,
    ));
    let lead_service = Arc::new(LeadService::new(Arc::new(InMemoryLeadRelay::default())));

    let app = with_platform_routes(listing_service, lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, weights = ?config.search.weights, "listing search service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
