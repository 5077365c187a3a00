//! Auth gateway service - HTTP server plus the limiter sweep task.

use crate::domain::{GatewayConfig, GatewayError};
use crate::gate::EmailGate;
use crate::routes::build_router;
use axum::Router;
use cc_02_abuse_limiter::{AttemptLimiter, InMemoryLimiter};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Auth gateway service
pub struct AuthGatewayService<L: AttemptLimiter = InMemoryLimiter> {
    config: GatewayConfig,
    gate: Arc<EmailGate<L>>,
}

impl AuthGatewayService<InMemoryLimiter> {
    /// Create a new service with an in-memory limiter.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        let gate = Arc::new(EmailGate::in_memory(config.limiter.clone()));
        Ok(Self { config, gate })
    }
}

impl<L: AttemptLimiter + 'static> AuthGatewayService<L> {
    /// Create a service around an existing gate.
    pub fn with_gate(config: GatewayConfig, gate: Arc<EmailGate<L>>) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, gate })
    }

    /// Get configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Shared handle to the gate.
    pub fn gate(&self) -> Arc<EmailGate<L>> {
        Arc::clone(&self.gate)
    }

    /// HTTP router for this service.
    pub fn router(&self) -> Router {
        build_router(self.gate())
    }

    /// Spawn the periodic sweep of expired limiter records.
    pub fn spawn_sweeper(&self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(sweep_task(
            self.gate(),
            self.config.limiter.sweep_interval,
            shutdown,
        ))
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve<F>(&self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(GatewayError::Serve)?;
        info!(%addr, "Auth gateway listening");

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(GatewayError::Serve)?;

        info!("Auth gateway stopped");
        Ok(())
    }
}

/// Periodically drop expired limiter records until `shutdown` flips or its
/// sender goes away.
pub async fn sweep_task<L: AttemptLimiter>(
    gate: Arc<EmailGate<L>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = gate.sweep_expired();
                debug!(removed, "Limiter sweep complete");
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("Limiter sweep task stopping");
                    break;
                }
            }
        }
    }
}
