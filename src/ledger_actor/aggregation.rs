//! Aggregation engine: revenue and profit rolled up from sale transactions.
//!
//! A sale is an OUT whose notes start with the configured marker. Every figure is computed with
//! the product's *current* prices, so editing a price changes historical reports.

use super::ProductLedger;
use crate::framework::Store;
use crate::model::{
    CategoryFinancials, DailyFinancials, DateRange, FinancialStats, Product, RangeFinancialStats,
    StockTransaction, UNCATEGORIZED,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

struct Sale<'a> {
    product: &'a Product,
    transaction: &'a StockTransaction,
}

impl Sale<'_> {
    fn revenue(&self) -> f64 {
        self.transaction.quantity * self.product.selling_price
    }

    fn profit(&self) -> f64 {
        self.transaction.quantity * self.product.unit_margin()
    }

    fn date(&self) -> NaiveDate {
        self.transaction.date()
    }

    fn category(&self) -> &str {
        self.product
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

fn sales<'a>(
    store: &'a Store<ProductLedger>,
    marker: &'a str,
) -> impl Iterator<Item = Sale<'a>> + 'a {
    store.values().flat_map(move |ledger| {
        ledger
            .entries
            .iter()
            .filter(move |t| t.is_sale(marker))
            .map(move |transaction| Sale {
                product: &ledger.product,
                transaction,
            })
    })
}

fn sales_in<'a>(
    store: &'a Store<ProductLedger>,
    marker: &'a str,
    range: DateRange,
) -> impl Iterator<Item = Sale<'a>> + 'a {
    sales(store, marker).filter(move |sale| range.contains(sale.date()))
}

pub(crate) fn financial_stats(
    store: &Store<ProductLedger>,
    marker: &str,
    today: NaiveDate,
) -> FinancialStats {
    sales(store, marker).fold(FinancialStats::default(), |mut stats, sale| {
        let (revenue, profit) = (sale.revenue(), sale.profit());
        stats.total_revenue += revenue;
        stats.total_profit += profit;
        if sale.date() == today {
            stats.today_revenue += revenue;
            stats.today_profit += profit;
        }
        stats
    })
}

pub(crate) fn financial_stats_for_range(
    store: &Store<ProductLedger>,
    marker: &str,
    range: DateRange,
) -> RangeFinancialStats {
    sales_in(store, marker, range).fold(RangeFinancialStats::default(), |mut stats, sale| {
        stats.total_revenue += sale.revenue();
        stats.total_profit += sale.profit();
        stats.transaction_count += 1;
        stats
    })
}

/// One row per day with sales, oldest first.
pub(crate) fn daily_breakdown(
    store: &Store<ProductLedger>,
    marker: &str,
    range: DateRange,
) -> Vec<DailyFinancials> {
    let mut days: BTreeMap<NaiveDate, DailyFinancials> = BTreeMap::new();
    for sale in sales_in(store, marker, range) {
        let row = days
            .entry(sale.date())
            .or_insert_with(|| DailyFinancials::empty(sale.date()));
        row.revenue += sale.revenue();
        row.profit += sale.profit();
        row.transaction_count += 1;
    }
    days.into_values().collect()
}

/// One row per category, highest revenue first.
pub(crate) fn category_breakdown(
    store: &Store<ProductLedger>,
    marker: &str,
    range: DateRange,
) -> Vec<CategoryFinancials> {
    let mut categories: HashMap<String, CategoryFinancials> = HashMap::new();
    for sale in sales_in(store, marker, range) {
        let row = categories
            .entry(sale.category().to_string())
            .or_insert_with(|| CategoryFinancials {
                category: sale.category().to_string(),
                revenue: 0.0,
                profit: 0.0,
                quantity_sold: 0.0,
                transaction_count: 0,
            });
        row.revenue += sale.revenue();
        row.profit += sale.profit();
        row.quantity_sold += sale.transaction.quantity;
        row.transaction_count += 1;
    }

    let mut rows: Vec<_> = categories.into_values().collect();
    rows.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}
