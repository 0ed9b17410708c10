//! Messages understood by the ledger actor beyond plain CRUD.
//!
//! Actions target one [`ProductLedger`](super::ProductLedger) and may change it. Queries read
//! the whole store and never do.

use crate::model::{
    BalanceAudit, BatchExpiry, CategoryFinancials, DailyFinancials, DateRange, FinancialStats,
    Product, ProductId, ProductUpdate, RangeFinancialStats, RecordOutcome, RevertOutcome,
    StockMovement, StockTransaction, TransactionFilter, TransactionId, TransactionStats,
};

/// Mutations of a single product ledger.
#[derive(Debug, Clone)]
pub enum StockAction {
    /// Validates a movement, appends it to the ledger and moves the stock.
    ///
    /// # Errors
    /// `InvalidQuantity` for a negative or non-finite quantity, `InsufficientStock` when an OUT
    /// would overdraw.
    Record(StockMovement),
    /// Removes a transaction and undoes its effect on the live stock.
    Revert(TransactionId),
    /// Catalog edit. Never moves stock.
    Edit(ProductUpdate),
}

/// Results from StockActions - variants match 1:1 with StockAction
#[derive(Debug, Clone)]
pub enum StockActionResult {
    Recorded(RecordOutcome),
    Reverted(RevertOutcome),
    Edited(Product),
}

/// Reads over the whole catalog and ledger.
#[derive(Debug, Clone)]
pub enum LedgerQuery {
    /// Which product owns a transaction.
    Owner(TransactionId),
    /// One product's history, newest first.
    ProductTransactions {
        product_id: ProductId,
        offset: usize,
        limit: usize,
    },
    /// Global feed, newest first, at most [`ALL_TRANSACTIONS_CAP`](super::ALL_TRANSACTIONS_CAP) rows.
    AllTransactions(TransactionFilter),
    Recent(usize),
    TransactionStats,
    CountTransactions(TransactionFilter),
    FinancialStats,
    FinancialStatsForRange(DateRange),
    DailyBreakdown(DateRange),
    CategoryBreakdown(DateRange),
    Products,
    LowStock,
    NearExpiry(u32),
    ExpiringBatches(u32),
    Audit(ProductId),
    /// One product without its ledger.
    Product(ProductId),
}

/// Results from LedgerQueries - variants match 1:1 with LedgerQuery
#[derive(Debug, Clone)]
pub enum LedgerQueryResult {
    Owner(Option<ProductId>),
    ProductTransactions(Vec<StockTransaction>),
    AllTransactions(Vec<StockTransaction>),
    Recent(Vec<StockTransaction>),
    TransactionStats(TransactionStats),
    CountTransactions(usize),
    FinancialStats(FinancialStats),
    FinancialStatsForRange(RangeFinancialStats),
    DailyBreakdown(Vec<DailyFinancials>),
    CategoryBreakdown(Vec<CategoryFinancials>),
    Products(Vec<Product>),
    LowStock(Vec<Product>),
    NearExpiry(Vec<Product>),
    ExpiringBatches(Vec<BatchExpiry>),
    Audit(BalanceAudit),
    Product(Product),
}
