//! Reusable reservation server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! snapshot seeding, the HTTP router, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::application::ReservationService;
use crate::config::AppConfig;
use crate::domain::SnapshotStore;
use crate::infrastructure::{InMemoryReservationRepository, JsonSnapshotFile};
use crate::interfaces::http::create_router;
use crate::support::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the reservation server.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running reservation server.
///
/// # Examples
///
/// ```rust,no_run
/// use reservas::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Reservation service backing every route.
    pub service: Arc<ReservationService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the HTTP listener is bound to.
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the reservation server with the given options.
    ///
    /// This will:
    /// 1. Seed the store from the snapshot file (if enabled)
    /// 2. Build the reservation service and HTTP router
    /// 3. Bind the listener and serve until shutdown is triggered
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting Reservas Ortiz...");

        // ── Store & snapshot ───────────────────────────────────
        let snapshot = Arc::new(JsonSnapshotFile::new(app_cfg.storage.data_file.clone()));
        let repo = if app_cfg.storage.load_on_startup {
            seed_repository(snapshot.as_ref()).await
        } else {
            InMemoryReservationRepository::new()
        };
        let repo = Arc::new(repo);

        let service = Arc::new(
            ReservationService::new(repo)
                .with_snapshot(snapshot, app_cfg.storage.persist_on_mutation),
        );
        if app_cfg.storage.persist_on_mutation {
            info!(
                "Persisting every change to {}",
                app_cfg.storage.data_file.display()
            );
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── HTTP server ────────────────────────────────────────
        let router = create_router(service.clone());

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 HTTP server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("HTTP server error: {}", e);
            }
        });

        info!("🚀 Server started.");

        Ok(Self {
            service,
            config: app_cfg,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Call [`wait`](Self::wait) to block until the server has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered,
    /// bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        info!("⏳ Waiting for server task to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        let abort = self.api_task.abort_handle();

        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("HTTP server stopped"),
            Ok(Err(e)) => error!("HTTP server task panicked: {}", e),
            Err(_) => {
                warn!(
                    "HTTP server did not stop within {}s, aborting",
                    timeout.as_secs()
                );
                abort.abort();
            }
        }

        info!("👋 Reservas Ortiz shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down Reservas Ortiz...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Build the store from the snapshot. A missing, unreadable, corrupt or
/// inconsistent snapshot yields an empty store.
async fn seed_repository(snapshot: &dyn SnapshotStore) -> InMemoryReservationRepository {
    let seeded = snapshot
        .load()
        .await
        .and_then(InMemoryReservationRepository::with_records);

    match seeded {
        Ok(repo) => repo,
        Err(e) => {
            warn!("Starting with an empty store: {}", e);
            InMemoryReservationRepository::new()
        }
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServerConfig, StorageConfig};
    use crate::domain::ReservationInput;
    use chrono::{Duration as ChronoDuration, Local};

    fn options(dir: &tempfile::TempDir, persist: bool) -> ServerOptions {
        ServerOptions {
            config: AppConfig {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                    shutdown_timeout: 2,
                },
                storage: StorageConfig {
                    data_file: dir.path().join("reservas.json"),
                    load_on_startup: true,
                    persist_on_mutation: persist,
                },
                ..AppConfig::default()
            },
        }
    }

    fn tomorrow_input(name: &str) -> ReservationInput {
        let tomorrow = Local::now().date_naive() + ChronoDuration::days(1);
        ReservationInput {
            client_name: Some(name.to_string()),
            date: Some(tomorrow.format("%Y-%m-%d").to_string()),
            time: Some("20:00".to_string()),
            guests: Some("4".to_string()),
            notes: None,
            phone: Some("555-1234".to_string()),
        }
    }

    #[tokio::test]
    async fn starts_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let handle = ServerHandle::start(options(&dir, false)).await.unwrap();

        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn corrupt_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(&dir, false);
        std::fs::write(&opts.config.storage.data_file, "{ not json").unwrap();

        let handle = ServerHandle::start(opts).await.unwrap();
        let snapshot = handle.service.debug_dump().await;
        assert!(snapshot.reservations.is_empty());
        assert_eq!(snapshot.next_id, 1);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn inconsistent_snapshot_starts_empty() {
        let record = |id: u64| {
            format!(
                r#"{{"id": {}, "clientName": "Ana", "date": "2030-01-02", "time": "20:00"}}"#,
                id
            )
        };

        for body in [
            format!("[{}, {}]", record(1), record(1)),
            format!("[{}]", record(0)),
            format!("[{}]", record(u32::MAX as u64)),
        ] {
            let dir = tempfile::tempdir().unwrap();
            let opts = options(&dir, false);
            std::fs::write(&opts.config.storage.data_file, body).unwrap();

            let handle = ServerHandle::start(opts).await.unwrap();
            let snapshot = handle.service.debug_dump().await;
            assert!(snapshot.reservations.is_empty());
            assert_eq!(snapshot.next_id, 1);

            handle.shutdown().await;
        }
    }

    #[tokio::test]
    async fn persisted_reservations_survive_restart() {
        let dir = tempfile::tempdir().unwrap();

        let first = ServerHandle::start(options(&dir, true)).await.unwrap();
        let now = Local::now().naive_local();
        first
            .service
            .create(tomorrow_input("Ana"), now)
            .await
            .unwrap();
        first.shutdown().await;

        let second = ServerHandle::start(options(&dir, false)).await.unwrap();
        let snapshot = second.service.debug_dump().await;
        assert_eq!(snapshot.reservations.len(), 1);
        assert_eq!(snapshot.reservations[0].client_name, "Ana");
        assert_eq!(snapshot.next_id, 2);

        second.shutdown().await;
    }
}
