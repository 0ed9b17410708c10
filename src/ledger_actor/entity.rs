//! ActorEntity implementation for [`ProductLedger`].
//!
//! A product and its stock transactions form one entity, so recording or reverting a
//! transaction updates the ledger and the product's stock in a single `handle_action` call.

use super::actions::{LedgerQuery, LedgerQueryResult, StockAction, StockActionResult};
use super::{aggregation, query, LedgerContext, LedgerError};
use crate::framework::{ActorEntity, Store};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, StockTransaction};
use async_trait::async_trait;
use tracing::info;

/// A catalog entry together with its ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLedger {
    pub(crate) product: Product,
    /// Stock the product was created with; the origin for balance replays.
    pub(crate) opening_stock: f64,
    /// Committed transactions in commit order.
    pub(crate) entries: Vec<StockTransaction>,
}

impl ProductLedger {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn opening_stock(&self) -> f64 {
        self.opening_stock
    }

    pub fn entries(&self) -> &[StockTransaction] {
        &self.entries
    }

    pub fn into_product(self) -> Product {
        self.product
    }

    /// Applies catalog edits to the product. Stock is never touched here, and nothing changes
    /// when the edited product would be invalid.
    pub(crate) fn edit(&mut self, update: ProductUpdate) -> Result<&Product, LedgerError> {
        if update.clear_expiry && update.expiry_date.is_some() {
            return Err(LedgerError::InvalidProduct(
                "expiry_date cannot be set and cleared at once".into(),
            ));
        }

        let mut product = self.product.clone();
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(unit) = update.unit {
            product.unit = unit;
        }
        if let Some(category) = update.category {
            product.category = normalize_category(Some(category));
        }
        if let Some(min_stock) = update.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(purchase_price) = update.purchase_price {
            product.purchase_price = purchase_price;
        }
        if let Some(selling_price) = update.selling_price {
            product.selling_price = selling_price;
        }
        if let Some(expiry_date) = update.expiry_date {
            product.expiry_date = Some(expiry_date);
        }
        if update.clear_expiry {
            product.expiry_date = None;
        }
        validate(&product)?;

        self.product = product;
        Ok(&self.product)
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), LedgerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidProduct(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

fn non_blank(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        Err(LedgerError::InvalidProduct(format!("{field} must not be blank")))
    } else {
        Ok(())
    }
}

fn validate(product: &Product) -> Result<(), LedgerError> {
    non_blank("name", &product.name)?;
    non_blank("unit", &product.unit)?;
    non_negative("min_stock", product.min_stock)?;
    non_negative("purchase_price", product.purchase_price)?;
    non_negative("selling_price", product.selling_price)
}

/// Blank categories are stored as none.
fn normalize_category(category: Option<String>) -> Option<String> {
    category.filter(|c| !c.trim().is_empty())
}

#[async_trait]
impl ActorEntity for ProductLedger {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = StockAction;
    type ActionResult = StockActionResult;
    type Query = LedgerQuery;
    type QueryResult = LedgerQueryResult;
    type Context = LedgerContext;
    type Error = LedgerError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, LedgerError> {
        if !params.initial_stock.is_finite() || params.initial_stock < 0.0 {
            return Err(LedgerError::InvalidQuantity(params.initial_stock));
        }
        let product = Product {
            id,
            name: params.name,
            unit: params.unit,
            category: normalize_category(params.category),
            current_stock: params.initial_stock,
            min_stock: params.min_stock,
            purchase_price: params.purchase_price,
            selling_price: params.selling_price,
            expiry_date: params.expiry_date,
        };
        validate(&product)?;

        Ok(Self {
            opening_stock: product.current_stock,
            product,
            entries: Vec::new(),
        })
    }

    /// Applies catalog edits through [`ProductLedger::edit`].
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &LedgerContext,
    ) -> Result<(), LedgerError> {
        self.edit(update).map(|_| ())
    }

    async fn on_delete(&self, _ctx: &LedgerContext) -> Result<(), LedgerError> {
        info!(
            product_id = %self.product.id,
            transactions = self.entries.len(),
            "Removing product with its ledger"
        );
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: StockAction,
        ctx: &LedgerContext,
    ) -> Result<StockActionResult, LedgerError> {
        match action {
            StockAction::Record(movement) => {
                self.record(movement, ctx).map(StockActionResult::Recorded)
            }
            StockAction::Revert(transaction_id) => {
                self.revert(transaction_id).map(StockActionResult::Reverted)
            }
            StockAction::Edit(update) => self
                .edit(update)
                .map(|product| StockActionResult::Edited(product.clone())),
        }
    }

    fn handle_query(
        store: &Store<Self>,
        request: LedgerQuery,
        ctx: &LedgerContext,
    ) -> Result<LedgerQueryResult, LedgerError> {
        let marker = ctx.sale_marker();
        let result = match request {
            LedgerQuery::Owner(transaction_id) => {
                LedgerQueryResult::Owner(query::owner(store, transaction_id))
            }
            LedgerQuery::ProductTransactions {
                product_id,
                offset,
                limit,
            } => LedgerQueryResult::ProductTransactions(query::product_transactions(
                store, product_id, offset, limit,
            )?),
            LedgerQuery::AllTransactions(filter) => {
                LedgerQueryResult::AllTransactions(query::all_transactions(store, &filter))
            }
            LedgerQuery::Recent(limit) => LedgerQueryResult::Recent(query::recent(store, limit)),
            LedgerQuery::TransactionStats => {
                LedgerQueryResult::TransactionStats(query::transaction_stats(store, ctx.now()))
            }
            LedgerQuery::CountTransactions(filter) => {
                LedgerQueryResult::CountTransactions(query::count(store, &filter))
            }
            LedgerQuery::FinancialStats => LedgerQueryResult::FinancialStats(
                aggregation::financial_stats(store, marker, ctx.today()),
            ),
            LedgerQuery::FinancialStatsForRange(range) => {
                LedgerQueryResult::FinancialStatsForRange(aggregation::financial_stats_for_range(
                    store, marker, range,
                ))
            }
            LedgerQuery::DailyBreakdown(range) => LedgerQueryResult::DailyBreakdown(
                aggregation::daily_breakdown(store, marker, range),
            ),
            LedgerQuery::CategoryBreakdown(range) => LedgerQueryResult::CategoryBreakdown(
                aggregation::category_breakdown(store, marker, range),
            ),
            LedgerQuery::Product(product_id) => {
                LedgerQueryResult::Product(query::product(store, product_id)?)
            }
            LedgerQuery::Products => LedgerQueryResult::Products(query::products(store)),
            LedgerQuery::LowStock => LedgerQueryResult::LowStock(query::low_stock(store)),
            LedgerQuery::NearExpiry(days) => {
                LedgerQueryResult::NearExpiry(query::near_expiry(store, ctx.today(), days))
            }
            LedgerQuery::ExpiringBatches(days) => LedgerQueryResult::ExpiringBatches(
                query::expiring_batches(store, ctx.today(), days),
            ),
            LedgerQuery::Audit(product_id) => {
                let ledger = store
                    .get(&product_id)
                    .ok_or(LedgerError::ProductNotFound(product_id))?;
                LedgerQueryResult::Audit(ledger.audit())
            }
        };
        Ok(result)
    }
}
