//! Products in the catalog.
//!
//! # Actor Framework
//! Products are not actors on their own: each one is wrapped, together with its stock
//! transactions, in a [`ProductLedger`](crate::ledger_actor::ProductLedger) entity managed by a
//! [`ResourceActor`](crate::framework::ResourceActor).
//!
//! - Creation parameters: [`ProductCreate`]
//! - Update parameters: [`ProductUpdate`] (pricing and metadata only, never stock)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Display unit, e.g. "pcs" or "kg".
    pub unit: String,
    pub category: Option<String>,
    /// Only the ledger changes this after creation.
    pub current_stock: f64,
    pub min_stock: f64,
    pub purchase_price: f64,
    pub selling_price: f64,
    pub expiry_date: Option<NaiveDate>,
}

impl Product {
    /// At or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }

    /// Expires on or before `today + window_days`. Already expired products count.
    pub fn expires_within(&self, today: NaiveDate, window_days: u32) -> bool {
        self.expiry_date
            .is_some_and(|expiry| (expiry - today).num_days() <= i64::from(window_days))
    }

    /// Margin per unit at current pricing.
    pub fn unit_margin(&self) -> f64 {
        self.selling_price - self.purchase_price
    }
}

/// Payload for creating a new product. `initial_stock` becomes the opening balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub unit: String,
    pub category: Option<String>,
    pub initial_stock: f64,
    pub min_stock: f64,
    pub purchase_price: f64,
    pub selling_price: f64,
    pub expiry_date: Option<NaiveDate>,
}

impl ProductCreate {
    /// A product with no category, threshold or expiry.
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        initial_stock: f64,
        purchase_price: f64,
        selling_price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            category: None,
            initial_stock,
            min_stock: 0.0,
            purchase_price,
            selling_price,
            expiry_date: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_stock(mut self, min_stock: f64) -> Self {
        self.min_stock = min_stock;
        self
    }

    pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }
}

/// Payload for updating an existing product. `None` leaves the field as is; an empty
/// `category` clears it, and so does `clear_expiry` for the expiry date.
///
/// Stock is not updatable here; it moves only through recorded transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub min_stock: Option<f64>,
    pub purchase_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
    /// Removes the expiry date. Cannot be combined with `expiry_date`.
    #[serde(default)]
    pub clear_expiry: bool,
}
