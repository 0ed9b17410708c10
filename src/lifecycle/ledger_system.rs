use crate::clients::{CatalogClient, LedgerClient};
use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::ledger_actor::{LedgerContext, LedgerError};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the stock ledger.
///
/// `LedgerSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the ledger actor
/// - **Dependency Wiring**: injecting the clock, transaction sequence and sale marker
/// - **Handing out clients**: [`CatalogClient`] and [`LedgerClient`], both cheap to clone
///
/// There is no global store handle: whoever needs the ledger gets a client clone.
///
/// # Example
///
/// ```ignore
/// let system = LedgerSystem::new(&LedgerConfig::default());
///
/// let rice = system.catalog.create_product(ProductCreate::new("Rice", "kg", 10.0, 8.0, 12.0)).await?;
/// system.ledger.record(rice, StockMovement::stock_out(2.0).with_notes("Sale")).await?;
///
/// system.shutdown().await?;
/// ```
pub struct LedgerSystem {
    /// Client for product management
    pub catalog: CatalogClient,

    /// Client for stock transactions and reports
    pub ledger: LedgerClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl LedgerSystem {
    /// Starts the ledger actor on the host's local clock.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &LedgerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Starts the ledger actor with an explicit clock.
    pub fn with_clock(config: &LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        // A zero-capacity channel is not allowed
        let buffer = config.channel_buffer.max(1);
        let (actor, catalog, ledger) = crate::ledger_actor::new(buffer);
        let context = LedgerContext::new(clock, config.sale_marker.clone());
        let handle = tokio::spawn(actor.run(context));

        info!(
            channel_buffer = buffer,
            sale_marker = %config.sale_marker,
            "Ledger system started"
        );
        Self {
            catalog,
            ledger,
            handle,
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops both clients, which closes the actor's channel once every other clone handed out
    /// earlier has been dropped too, then waits for the actor task to finish.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(LedgerError::StorageFailure)` if the actor task panicked
    pub async fn shutdown(self) -> Result<(), LedgerError> {
        info!("Shutting down ledger system...");

        drop(self.catalog);
        drop(self.ledger);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Ledger actor task failed");
            return Err(LedgerError::StorageFailure(format!(
                "ledger actor task failed: {e}"
            )));
        }

        info!("Ledger system shutdown complete.");
        Ok(())
    }
}
