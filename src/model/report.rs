//! Read-side records: counts, financial roll-ups, expiry and audit reports.
//!
//! All of these are plain data. They are produced by the ledger's query layer and can be handed
//! as-is to whatever renders them (screens, CSV export, notifications).

use crate::model::{ProductId, TransactionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bucket name for products without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Inclusive range of local calendar days. A range whose start is after its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }
}

/// Ledger activity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_in: usize,
    pub total_out: usize,
    pub today_in: usize,
    pub today_out: usize,
    /// Transactions of any type in the trailing seven days.
    pub last_7_days: usize,
}

/// All-time and today's sales figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStats {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub today_revenue: f64,
    pub today_profit: f64,
}

/// Sales figures over a [`DateRange`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFinancialStats {
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Number of sale transactions in the range.
    pub transaction_count: usize,
}

/// One day of sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyFinancials {
    pub date: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
    pub transaction_count: usize,
}

impl DailyFinancials {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            revenue: 0.0,
            profit: 0.0,
            transaction_count: 0,
        }
    }
}

/// Sales for one product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFinancials {
    pub category: String,
    pub revenue: f64,
    pub profit: f64,
    pub quantity_sold: f64,
    pub transaction_count: usize,
}

/// Returns one row per day of `range`, taking existing rows from `rows` and zero rows for days
/// without sales.
pub fn fill_daily_gaps(range: DateRange, rows: &[DailyFinancials]) -> Vec<DailyFinancials> {
    range
        .days()
        .map(|day| {
            rows.iter()
                .find(|row| row.date == day)
                .copied()
                .unwrap_or_else(|| DailyFinancials::empty(day))
        })
        .collect()
}

/// An incoming lot whose expiry date is near.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchExpiry {
    pub transaction_id: TransactionId,
    pub product_id: ProductId,
    pub product_name: String,
    pub batch_number: Option<String>,
    pub expiry_date: NaiveDate,
    pub quantity: f64,
    /// Negative once expired.
    pub days_remaining: i64,
}

/// A ledger row whose stored balance differs from the replayed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceDivergence {
    pub transaction_id: TransactionId,
    pub recorded: f64,
    pub replayed: f64,
}

/// Result of replaying one product's ledger from its opening stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceAudit {
    pub product_id: ProductId,
    pub opening_stock: f64,
    pub replayed_stock: f64,
    pub live_stock: f64,
    pub divergences: Vec<BalanceDivergence>,
}

impl BalanceAudit {
    /// Every snapshot matches the replay and the replay ends at the live stock.
    pub fn is_consistent(&self) -> bool {
        self.divergences.is_empty() && self.matches_live_stock()
    }

    pub fn matches_live_stock(&self) -> bool {
        crate::ledger_actor::same_quantity(self.replayed_stock, self.live_stock)
    }
}
