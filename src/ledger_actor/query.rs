//! Query layer: scoped, filtered and paginated reads of the catalog and ledger.
//!
//! "Newest first" always means commit order reversed, i.e. id descending. Ids grow with every
//! commit while wall-clock timestamps may step backwards, so the id is the ordering key.

use super::writer::{apply, magnitude, same_quantity, settle};
use super::{LedgerError, ProductLedger};
use crate::framework::Store;
use crate::model::{
    BalanceAudit, BalanceDivergence, BatchExpiry, Product, ProductId, StockTransaction,
    TransactionFilter, TransactionId, TransactionStats, TransactionType,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Most rows the global transaction feed returns.
pub const ALL_TRANSACTIONS_CAP: usize = 100;

pub(crate) fn newest_first(a: &StockTransaction, b: &StockTransaction) -> Ordering {
    b.id.cmp(&a.id)
}

pub(crate) fn all_entries(store: &Store<ProductLedger>) -> impl Iterator<Item = &StockTransaction> {
    store.values().flat_map(|ledger| ledger.entries.iter())
}

fn newest<'a>(
    rows: impl Iterator<Item = &'a StockTransaction>,
    offset: usize,
    limit: usize,
) -> Vec<StockTransaction> {
    let mut rows: Vec<_> = rows.collect();
    rows.sort_by(|a, b| newest_first(a, b));
    rows.into_iter().skip(offset).take(limit).cloned().collect()
}

pub(crate) fn owner(store: &Store<ProductLedger>, id: TransactionId) -> Option<ProductId> {
    store
        .values()
        .find(|ledger| ledger.entries.iter().any(|t| t.id == id))
        .map(|ledger| ledger.product.id)
}

pub(crate) fn product_transactions(
    store: &Store<ProductLedger>,
    product_id: ProductId,
    offset: usize,
    limit: usize,
) -> Result<Vec<StockTransaction>, LedgerError> {
    let ledger = store
        .get(&product_id)
        .ok_or(LedgerError::ProductNotFound(product_id))?;
    Ok(newest(ledger.entries.iter(), offset, limit))
}

pub(crate) fn all_transactions(
    store: &Store<ProductLedger>,
    filter: &TransactionFilter,
) -> Vec<StockTransaction> {
    newest(
        all_entries(store).filter(|t| filter.matches(t)),
        0,
        ALL_TRANSACTIONS_CAP,
    )
}

pub(crate) fn recent(store: &Store<ProductLedger>, limit: usize) -> Vec<StockTransaction> {
    newest(all_entries(store), 0, limit)
}

pub(crate) fn count(store: &Store<ProductLedger>, filter: &TransactionFilter) -> usize {
    all_entries(store).filter(|t| filter.matches(t)).count()
}

pub(crate) fn transaction_stats(store: &Store<ProductLedger>, now: NaiveDateTime) -> TransactionStats {
    let today = now.date();
    let week_ago = now - Duration::days(7);

    all_entries(store).fold(TransactionStats::default(), |mut stats, t| {
        let is_today = t.date() == today;
        match t.kind {
            TransactionType::In => {
                stats.total_in += 1;
                stats.today_in += usize::from(is_today);
            }
            TransactionType::Out => {
                stats.total_out += 1;
                stats.today_out += usize::from(is_today);
            }
            TransactionType::Adjust => {}
        }
        if t.transaction_date >= week_ago {
            stats.last_7_days += 1;
        }
        stats
    })
}

pub(crate) fn product(
    store: &Store<ProductLedger>,
    product_id: ProductId,
) -> Result<Product, LedgerError> {
    store
        .get(&product_id)
        .map(|ledger| ledger.product.clone())
        .ok_or(LedgerError::ProductNotFound(product_id))
}

/// Every product, by id.
pub(crate) fn products(store: &Store<ProductLedger>) -> Vec<Product> {
    let mut products: Vec<_> = store.values().map(|l| l.product.clone()).collect();
    products.sort_by_key(|p| p.id);
    products
}

pub(crate) fn low_stock(store: &Store<ProductLedger>) -> Vec<Product> {
    products(store)
        .into_iter()
        .filter(Product::is_low_stock)
        .collect()
}

/// Products expiring within `days`, soonest first.
pub(crate) fn near_expiry(store: &Store<ProductLedger>, today: NaiveDate, days: u32) -> Vec<Product> {
    let mut expiring: Vec<_> = products(store)
        .into_iter()
        .filter(|p| p.expires_within(today, days))
        .collect();
    expiring.sort_by_key(|p| (p.expiry_date, p.id));
    expiring
}

/// IN lots whose batch expiry falls within `days`, soonest first.
pub(crate) fn expiring_batches(
    store: &Store<ProductLedger>,
    today: NaiveDate,
    days: u32,
) -> Vec<BatchExpiry> {
    let mut batches: Vec<_> = store
        .values()
        .flat_map(|ledger| {
            ledger.entries.iter().filter_map(move |t| {
                let expiry_date = t.batch_expiry_date.filter(|_| t.kind == TransactionType::In)?;
                let days_remaining = (expiry_date - today).num_days();
                (days_remaining <= i64::from(days)).then(|| BatchExpiry {
                    transaction_id: t.id,
                    product_id: ledger.product.id,
                    product_name: ledger.product.name.clone(),
                    batch_number: t.batch_number.clone(),
                    expiry_date,
                    quantity: t.quantity,
                    days_remaining,
                })
            })
        })
        .collect();
    batches.sort_by_key(|b| (b.expiry_date, b.transaction_id));
    batches
}

impl ProductLedger {
    /// Replays the ledger from the opening stock in commit order and compares every stored
    /// `balance_after` with the replayed value.
    pub fn audit(&self) -> BalanceAudit {
        let mut stock = self.opening_stock;
        let mut divergences = Vec::new();
        for t in &self.entries {
            let raw = apply(t.kind, stock, t.quantity);
            stock = settle(raw, magnitude(stock, t.quantity)).unwrap_or(raw);
            if !same_quantity(stock, t.balance_after) {
                divergences.push(BalanceDivergence {
                    transaction_id: t.id,
                    recorded: t.balance_after,
                    replayed: stock,
                });
            }
        }

        BalanceAudit {
            product_id: self.product.id,
            opening_stock: self.opening_stock,
            replayed_stock: stock,
            live_stock: self.product.current_stock,
            divergences,
        }
    }
}
