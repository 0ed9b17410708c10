//! # Ledger Client
//!
//! Provides a high‑level API for the stock ledger: recording and reverting transactions, the
//! transaction feeds, and the financial reports. It wraps a `ResourceClient<ProductLedger>` and
//! unpacks the actor's action and query replies into plain results.
use crate::clients::actor_client::ActorClient;
use crate::clients::unexpected;
use crate::framework::{FrameworkError, ResourceClient};
use crate::ledger_actor::{
    LedgerError, LedgerQuery, LedgerQueryResult, ProductLedger, StockAction, StockActionResult,
};
use crate::model::{
    BalanceAudit, BatchExpiry, CategoryFinancials, DailyFinancials, DateRange, FinancialStats,
    ProductId, RangeFinancialStats, RecordOutcome, RevertOutcome, StockMovement,
    StockTransaction, TransactionFilter, TransactionId, TransactionStats, TransactionType,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the stock ledger.
#[derive(Clone)]
pub struct LedgerClient {
    inner: ResourceClient<ProductLedger>,
}

impl LedgerClient {
    pub fn new(inner: ResourceClient<ProductLedger>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ProductLedger> for LedgerClient {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<ProductLedger> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }

    fn not_found(id: ProductId) -> Self::Error {
        LedgerError::ProductNotFound(id)
    }
}

impl LedgerClient {
    // --- Writer / Reverser ---

    /// Applies a stock movement to a product and appends it to the ledger.
    ///
    /// The ledger row and the new stock are committed together or not at all.
    ///
    /// # Errors
    /// `ProductNotFound`, `InvalidQuantity`, or `InsufficientStock` when an OUT would overdraw.
    #[instrument(skip(self))]
    pub async fn record(
        &self,
        product_id: ProductId,
        movement: StockMovement,
    ) -> Result<RecordOutcome, LedgerError> {
        match self.act(product_id, StockAction::Record(movement)).await? {
            StockActionResult::Recorded(outcome) => Ok(outcome),
            other => Err(LedgerError::StorageFailure(format!(
                "unexpected reply: {other:?}"
            ))),
        }
    }

    /// Records a movement whose type arrives as text (`"IN"`, `"OUT"` or `"ADJUST"`).
    pub async fn record_named(
        &self,
        product_id: ProductId,
        kind: &str,
        quantity: f64,
        notes: Option<String>,
    ) -> Result<RecordOutcome, LedgerError> {
        let kind: TransactionType = kind.parse()?;
        let mut movement = StockMovement::new(kind, quantity);
        movement.notes = notes;
        self.record(product_id, movement).await
    }

    /// Removes a transaction and undoes its effect on the live stock.
    ///
    /// Later transactions of the same product keep their `balance_after` snapshots.
    ///
    /// # Errors
    /// `TransactionNotFound`, `ProductNotFound` if the owner disappeared meanwhile,
    /// `AdjustNotReversible`, or `InvalidReversal` when the stock cannot absorb the undo.
    #[instrument(skip(self))]
    pub async fn revert(&self, transaction_id: TransactionId) -> Result<RevertOutcome, LedgerError> {
        let product_id = match self.query(LedgerQuery::Owner(transaction_id)).await? {
            LedgerQueryResult::Owner(Some(product_id)) => product_id,
            LedgerQueryResult::Owner(None) => {
                return Err(LedgerError::TransactionNotFound(transaction_id));
            }
            other => return Err(unexpected(other)),
        };
        debug!(%product_id, "Owner resolved");

        match self.act(product_id, StockAction::Revert(transaction_id)).await? {
            StockActionResult::Reverted(outcome) => Ok(outcome),
            other => Err(LedgerError::StorageFailure(format!(
                "unexpected reply: {other:?}"
            ))),
        }
    }

    // --- Query layer ---

    /// The newest `limit` transactions of one product.
    pub async fn transactions_for_product(
        &self,
        product_id: ProductId,
        limit: usize,
    ) -> Result<Vec<StockTransaction>, LedgerError> {
        self.product_history_page(product_id, 0, limit).await
    }

    /// One page of a product's history, newest first.
    pub async fn product_history_page(
        &self,
        product_id: ProductId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<StockTransaction>, LedgerError> {
        let query = LedgerQuery::ProductTransactions {
            product_id,
            offset,
            limit,
        };
        match self.query(query).await? {
            LedgerQueryResult::ProductTransactions(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    /// The global feed, newest first, capped at
    /// [`ALL_TRANSACTIONS_CAP`](crate::ledger_actor::ALL_TRANSACTIONS_CAP) rows.
    pub async fn all_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<StockTransaction>, LedgerError> {
        match self.query(LedgerQuery::AllTransactions(filter)).await? {
            LedgerQueryResult::AllTransactions(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    pub async fn recent_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<StockTransaction>, LedgerError> {
        match self.query(LedgerQuery::Recent(limit)).await? {
            LedgerQueryResult::Recent(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    pub async fn stats(&self) -> Result<TransactionStats, LedgerError> {
        match self.query(LedgerQuery::TransactionStats).await? {
            LedgerQueryResult::TransactionStats(stats) => Ok(stats),
            other => Err(unexpected(other)),
        }
    }

    /// Uncapped number of transactions matching `filter`.
    pub async fn count_transactions(&self, filter: TransactionFilter) -> Result<usize, LedgerError> {
        match self.query(LedgerQuery::CountTransactions(filter)).await? {
            LedgerQueryResult::CountTransactions(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    // --- Aggregation ---

    pub async fn financial_stats(&self) -> Result<FinancialStats, LedgerError> {
        match self.query(LedgerQuery::FinancialStats).await? {
            LedgerQueryResult::FinancialStats(stats) => Ok(stats),
            other => Err(unexpected(other)),
        }
    }

    pub async fn financial_stats_for_range(
        &self,
        range: DateRange,
    ) -> Result<RangeFinancialStats, LedgerError> {
        match self.query(LedgerQuery::FinancialStatsForRange(range)).await? {
            LedgerQueryResult::FinancialStatsForRange(stats) => Ok(stats),
            other => Err(unexpected(other)),
        }
    }

    /// Days with sales only; see [`fill_daily_gaps`](crate::model::fill_daily_gaps).
    pub async fn daily_breakdown(
        &self,
        range: DateRange,
    ) -> Result<Vec<DailyFinancials>, LedgerError> {
        match self.query(LedgerQuery::DailyBreakdown(range)).await? {
            LedgerQueryResult::DailyBreakdown(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    pub async fn category_breakdown(
        &self,
        range: DateRange,
    ) -> Result<Vec<CategoryFinancials>, LedgerError> {
        match self.query(LedgerQuery::CategoryBreakdown(range)).await? {
            LedgerQueryResult::CategoryBreakdown(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    // --- Monitoring ---

    /// Incoming lots expiring within `days_window` days.
    pub async fn expiring_batches(&self, days_window: u32) -> Result<Vec<BatchExpiry>, LedgerError> {
        match self.query(LedgerQuery::ExpiringBatches(days_window)).await? {
            LedgerQueryResult::ExpiringBatches(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    /// Replays one product's ledger and reports stale balance snapshots.
    pub async fn audit(&self, product_id: ProductId) -> Result<BalanceAudit, LedgerError> {
        match self.query(LedgerQuery::Audit(product_id)).await? {
            LedgerQueryResult::Audit(audit) => Ok(audit),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    async fn query(&self, query: LedgerQuery) -> Result<LedgerQueryResult, LedgerError> {
        debug!("Sending request");
        self.inner.query(query).await.map_err(Self::map_error)
    }
}
