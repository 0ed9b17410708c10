//! Services injected into the ledger actor at `run()` time.

use crate::clock::Clock;
use crate::model::TransactionId;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Runtime context for [`ProductLedger`](super::ProductLedger).
pub struct LedgerContext {
    clock: Arc<dyn Clock>,
    transaction_ids: AtomicU64,
    sale_marker: String,
}

impl LedgerContext {
    pub fn new(clock: Arc<dyn Clock>, sale_marker: impl Into<String>) -> Self {
        Self {
            clock,
            transaction_ids: AtomicU64::new(1),
            sale_marker: sale_marker.into(),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Local calendar day of [`now`](Self::now).
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn sale_marker(&self) -> &str {
        &self.sale_marker
    }

    /// Allocates the next transaction id. Ids are never reused, even after a reversal.
    pub fn next_transaction_id(&self) -> TransactionId {
        TransactionId(self.transaction_ids.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Debug for LedgerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerContext")
            .field("now", &self.now())
            .field("transaction_ids", &self.transaction_ids)
            .field("sale_marker", &self.sale_marker)
            .finish()
    }
}
