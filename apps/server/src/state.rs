//! Shared application state

use std::sync::Arc;

use fleetops_geocoding::{Geocoder, NominatimClient};
use sqlx::PgPool;

use crate::{
    config::Config,
    db::{
        AuditRepository, IntegratedVendorStore, PlaceStore, PostgresIntegratedVendorStore,
        PostgresPlaceStore, PostgresVendorStore, VendorStore,
    },
    services::{
        AuditService, ExportService, IntegratedVendorService, PlaceSearchService, VendorService,
    },
    Result,
};

#[derive(Debug, Clone)]
pub struct AppStateOptions {
    pub run_migrations: bool,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            run_migrations: true,
        }
    }
}

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub place_store: Arc<dyn PlaceStore>,
    pub vendor_store: Arc<dyn VendorStore>,
    pub integrated_vendor_store: Arc<dyn IntegratedVendorStore>,
    pub place_search_service: Arc<PlaceSearchService>,
    pub export_service: Arc<ExportService>,
    pub vendor_service: Arc<VendorService>,
    pub integrated_vendor_service: Arc<IntegratedVendorService>,
    pub audit_service: Arc<AuditService>,
}

impl AppState {
    /// Initialize the application state
    pub async fn new(config: Config) -> Result<Self> {
        Self::new_with_options(config, AppStateOptions::default()).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let config = Arc::new(config);

        let db_pool = create_db_pool(config.as_ref()).await?;

        if options.run_migrations {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .map_err(|e| crate::Error::Internal(format!("Migration failed: {e}")))?;
        }

        let geocoder: Arc<dyn Geocoder> = Arc::new(
            NominatimClient::new(
                &config.geocoding.base_url,
                &config.geocoding.user_agent,
                config.geocoding.timeout_seconds,
                config.geocoding.max_results,
            )
            .map_err(|e| crate::Error::Internal(format!("Geocoder init failed: {e}")))?,
        );

        Ok(Self::assemble(config, db_pool, geocoder))
    }

    /// Wire services over an existing pool and geocoder. Split out so tests
    /// can inject a provider double.
    pub fn assemble(config: Arc<Config>, db_pool: PgPool, geocoder: Arc<dyn Geocoder>) -> Self {
        let place_store: Arc<dyn PlaceStore> =
            Arc::new(PostgresPlaceStore::new(db_pool.clone()));
        let vendor_store: Arc<dyn VendorStore> =
            Arc::new(PostgresVendorStore::new(db_pool.clone()));
        let integrated_vendor_store: Arc<dyn IntegratedVendorStore> =
            Arc::new(PostgresIntegratedVendorStore::new(db_pool.clone()));

        let audit_service = Arc::new(AuditService::new(Arc::new(AuditRepository::new(
            db_pool.clone(),
        ))));

        let place_search_service = Arc::new(PlaceSearchService::new(
            place_store.clone(),
            geocoder,
        ));
        let export_service = Arc::new(ExportService::new(place_store.clone()));
        let vendor_service = Arc::new(VendorService::new(
            vendor_store.clone(),
            place_store.clone(),
            audit_service.clone(),
        ));
        let integrated_vendor_service = Arc::new(IntegratedVendorService::new(
            integrated_vendor_store.clone(),
            audit_service.clone(),
        ));

        tracing::info!("Application state initialized successfully");

        Self {
            config,
            db_pool,
            place_store,
            vendor_store,
            integrated_vendor_store,
            place_search_service,
            export_service,
            vendor_service,
            integrated_vendor_service,
            audit_service,
        }
    }
}

async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let statement_timeout = config.database.statement_timeout_seconds;
    let lock_timeout = config.database.lock_timeout_seconds;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                // Cap query execution time.
                sqlx::query(&format!("SET statement_timeout = '{}s'", statement_timeout))
                    .execute(&mut *conn)
                    .await?;

                // Fail fast on contended locks.
                sqlx::query(&format!("SET lock_timeout = '{}s'", lock_timeout))
                    .execute(&mut *conn)
                    .await?;

                Ok(())
            })
        })
        .connect(&config.database.url)
        .await
        .map_err(crate::Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
