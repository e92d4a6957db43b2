//! # Social Runtime
//!
//! Starts the response listener and the three query responders, each on its
//! own task, and stops them together.
//!
//! ```text
//!            ┌──────────── InMemoryEventBus ────────────┐
//!            │                                          │
//!   Users ─ Social ─ Chat responders          ResponseListener
//!   (answer queries)                          (completes pending queries)
//! ```
//!
//! The listener starts first so no response can arrive before anyone is
//! subscribed to route it.

use crate::container::{RuntimeConfig, ServiceContainer};
use anyhow::Result;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How long shutdown waits for each task.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// The running backend.
pub struct SocialRuntime {
    /// Every module instance.
    container: Arc<ServiceContainer>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
    /// Running handler tasks.
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SocialRuntime {
    /// Validate configuration and build every module.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        info!("Creating social-activity runtime");

        let container = Arc::new(ServiceContainer::new(config));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Start the listener and the responders.
    pub fn start(&self) {
        info!("===========================================");
        info!("  Social-Activity Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let listener = self.container.response_listener();
        let (users, social, chat) = self.container.responders();

        let mut tasks = self.tasks.lock();
        tasks.push(self.spawn_until_shutdown("bridge", listener.run()));
        tasks.push(self.spawn_until_shutdown("sa-01", users.run()));
        tasks.push(self.spawn_until_shutdown("sa-02", social.run()));
        tasks.push(self.spawn_until_shutdown("sa-04", chat.run()));

        info!(
            tasks = tasks.len(),
            subscribers = self.container.bus.subscriber_count(),
            "Query handlers started"
        );
    }

    fn spawn_until_shutdown<F>(&self, name: &'static str, handler: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = handler => {
                    warn!("[{name}] Handler exited before shutdown");
                }
                _ = shutdown.changed() => {
                    info!("[{name}] Shutdown signal received");
                }
            }
        })
    }

    /// Stop every handler.
    ///
    /// Queries still waiting get their fallback once their window elapses.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let tasks: Vec<JoinHandle<()>> = self.tasks.lock().drain(..).collect();
        for task in tasks {
            match tokio::time::timeout(SHUTDOWN_GRACE, task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Handler task failed: {}", e),
                Err(_) => warn!("Handler task did not stop within {:?}", SHUTDOWN_GRACE),
            }
        }

        let (registered, completed, discarded, timeouts, released) =
            self.container.registry.stats().snapshot();
        info!(
            registered,
            completed,
            discarded,
            timeouts,
            released,
            pending = self.container.registry.pending_count(),
            "Shutdown complete"
        );
    }

    /// Get a reference to the service container.
    pub fn container(&self) -> Arc<ServiceContainer> {
        Arc::clone(&self.container)
    }
}
