//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing` subscriber for the whole process: compact output,
//! no module prefix (the actor logs carry `entity_type` instead), and a filter taken from
//! `RUST_LOG` or, when that is unset, from [`LedgerConfig::log_filter`].
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started`, `Shutdown` with the final store size
//! - **Requests**: every Create/Get/Update/Delete/Action/Query at `debug`, outcomes at `info`,
//!   rejections at `warn` with `error = %e`
//! - **Ledger writes**: `Recorded` / `Reverted` with old and new stock at `debug`
//! - **Client calls**: one span per client method (`#[instrument(skip(self))]`)
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=stock_ledger=debug cargo run   # payloads and stock moves
//! ```
//!
//! With `RUST_LOG=info` a short session reads:
//!
//! ```text
//! INFO Actor started entity_type="ProductLedger"
//! INFO Created entity_type="ProductLedger" id=product_1 size=1
//! INFO record: Action ok entity_type="ProductLedger" id=product_1
//! WARN record: Action failed entity_type="ProductLedger" id=product_1 error=Insufficient stock for product_1: requested 50 kg, available 8 kg
//! ```

use crate::config::LedgerConfig;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(config: &LedgerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
