//! Process wiring for the hotel reservations API
//!
//! [`ServerHandle::start`] opens the database, prepares the upload
//! directory, builds the services and serves the router until the
//! shutdown signal fires. [`init_tracing`] installs the log subscriber.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::{HotelierService, ListingService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::storage::{DiskImageStore, ImageStore};
use crate::infrastructure::{init_database, DatabaseConfig};
use crate::interfaces::create_api_router;
use crate::interfaces::http::modules::metrics::describe_metrics;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database: {0}")]
    Database(#[from] DbErr),

    #[error("upload directory {path}: {source}")]
    UploadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

pub struct ServerOptions {
    pub config: AppConfig,
    /// Apply pending migrations before serving
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

/// A running API server.
///
/// ```rust,no_run
/// use hotel_reservations::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = ServerHandle::start(ServerOptions::default()).await?;
///     server.install_signal_handler();
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Bound address; differs from the config when port 0 was requested
    pub local_addr: SocketAddr,
    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
}

/// The global recorder can be installed once per process; later servers
/// (tests, restarts) share the first handle.
fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                describe_metrics();
                info!("📊 Prometheus recorder installed");
                handle
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder already set; /metrics will be empty");
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

async fn open_database(config: &AppConfig, migrate: bool) -> Result<DatabaseConnection, DbErr> {
    let url = config.database.connection_url();
    let base = if url.contains(":memory:") {
        DatabaseConfig::in_memory()
    } else {
        DatabaseConfig::default()
    };
    let db = init_database(&DatabaseConfig { url, ..base }).await?;

    if migrate {
        Migrator::up(&db, None).await?;
        info!("Database schema up to date");
    }
    Ok(db)
}

async fn open_image_store(config: &AppConfig) -> Result<Arc<dyn ImageStore>, StartupError> {
    let dir = &config.storage.upload_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| StartupError::UploadDir {
            path: dir.display().to_string(),
            source,
        })?;
    info!(
        dir = %dir.display(),
        max_bytes = config.storage.max_image_bytes,
        "🖼️  Image storage ready"
    );
    Ok(Arc::new(DiskImageStore::new(dir.clone())))
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, StartupError> {
        let ServerOptions {
            config,
            auto_migrate,
        } = opts;
        let prometheus = prometheus_handle();

        let db = open_database(&config, auto_migrate).await?;
        let images = open_image_store(&config).await?;

        let jwt_config = JwtConfig::new(
            config.security.secret(),
            config.security.jwt_expiration_hours,
        );
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let hoteliers = Arc::new(HotelierService::new(repos.clone(), jwt_config.clone()));
        let listings = Arc::new(ListingService::new(
            repos.clone(),
            images,
            config.storage.max_image_bytes,
        ));

        let router = create_api_router(
            db.clone(),
            hoteliers,
            listings,
            jwt_config,
            prometheus,
            config.storage.max_image_bytes,
        );

        let addr = config.server.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| StartupError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| StartupError::Bind { addr, source })?;

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let stop = shutdown.signal();
        let api_task = tokio::spawn(async move {
            let served = axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(async move { stop.wait().await })
                .await;
            if let Err(e) = served {
                error!(error = %e, "API server stopped with an error");
            }
        });

        info!(%local_addr, "🚀 Hotel reservations API listening (docs at /docs/)");

        Ok(Self {
            repos,
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGTERM or SIGINT.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Block until shutdown is triggered, then let in-flight requests finish
    /// and close the database, bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!(error = %e, "API server task panicked");
                }
                match db.close().await {
                    Ok(()) => info!("Database connection closed"),
                    Err(e) => warn!(error = %e, "Closing the database failed"),
                }
            })
            .await;

        if drained {
            info!("👋 Server stopped");
        }
    }

    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `logging.level`;
/// `logging.format = "json"` switches to one JSON object per line.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let json = config.logging.format.eq_ignore_ascii_case("json");

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    if let Err(e) = installed {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(upload_dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = "sqlite::memory:".into();
        config.storage.upload_dir = upload_dir.to_path_buf();
        config
    }

    #[tokio::test]
    async fn starts_serves_health_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let handle = ServerHandle::start(ServerOptions {
            config: test_config(&dir.path().join("uploads")),
            auto_migrate: true,
        })
        .await
        .unwrap();

        assert_ne!(handle.local_addr.port(), 0);
        assert!(dir.path().join("uploads").is_dir());

        let body: serde_json::Value =
            reqwest::get(format!("http://{}/health", handle.local_addr))
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
        assert_eq!(body["status"], "ok");

        assert!(handle.is_running());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn upload_path_that_is_a_file_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("uploads");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = ServerHandle::start(ServerOptions {
            config: test_config(&blocker),
            auto_migrate: true,
        })
        .await
        .err()
        .unwrap();
        assert!(matches!(err, StartupError::UploadDir { .. }));
    }
}
