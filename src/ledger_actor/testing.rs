//! Fixtures shared by the ledger unit tests.

use super::{LedgerContext, ProductLedger};
use crate::clock::ManualClock;
use crate::framework::{ActorEntity, Store};
use crate::model::{ProductCreate, ProductId};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

pub(crate) fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub(crate) fn noon(month: u32, d: u32) -> NaiveDateTime {
    day(month, d).and_hms_opt(12, 0, 0).unwrap()
}

/// A clock standing at 2024-03-10 12:00.
pub(crate) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(noon(3, 10)))
}

pub(crate) fn context_on(clock: Arc<ManualClock>) -> LedgerContext {
    LedgerContext::new(clock, "Sale")
}

pub(crate) fn context() -> LedgerContext {
    context_on(clock())
}

/// Product 1, sold by the kg, bought at 60 and sold at 100.
pub(crate) fn ledger(name: &str, stock: f64) -> ProductLedger {
    priced(1, name, stock, 60.0, 100.0, None)
}

pub(crate) fn priced(
    id: u32,
    name: &str,
    stock: f64,
    purchase_price: f64,
    selling_price: f64,
    category: Option<&str>,
) -> ProductLedger {
    let mut params = ProductCreate::new(name, "kg", stock, purchase_price, selling_price);
    params.category = category.map(str::to_string);
    ProductLedger::from_create_params(ProductId(id), params).unwrap()
}

pub(crate) fn store(ledgers: Vec<ProductLedger>) -> Store<ProductLedger> {
    ledgers
        .into_iter()
        .map(|ledger| (ledger.product().id, ledger))
        .collect()
}
