//! # Catalog Client
//!
//! Product management on top of the ledger actor: create, edit, remove and list products, plus
//! the low-stock and near-expiry lookups used for alerting. Nothing here changes stock after a
//! product is created.
use crate::clients::actor_client::ActorClient;
use crate::clients::unexpected;
use crate::framework::{FrameworkError, ResourceClient};
use crate::ledger_actor::{
    LedgerError, LedgerQuery, LedgerQueryResult, ProductLedger, StockAction, StockActionResult,
};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<ProductLedger>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<ProductLedger>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ProductLedger> for CatalogClient {
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

impl CatalogClient {
    /// Adds a product with its opening stock.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, LedgerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The product without its ledger.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, LedgerError> {
        match self.query(LedgerQuery::Product(id)).await? {
            LedgerQueryResult::Product(product) => Ok(product),
            other => Err(unexpected(other)),
        }
    }

    /// Edits names, category, threshold, prices or expiry. Returns the product as stored.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, LedgerError> {
        debug!("Sending request");
        match self.act(id, StockAction::Edit(update)).await? {
            StockActionResult::Edited(product) => Ok(product),
            other => Err(LedgerError::StorageFailure(format!(
                "unexpected reply: {other:?}"
            ))),
        }
    }

    /// Removes the product together with its whole ledger.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), LedgerError> {
        self.delete(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, LedgerError> {
        match self.query(LedgerQuery::Products).await? {
            LedgerQueryResult::Products(products) => Ok(products),
            other => Err(unexpected(other)),
        }
    }

    /// Products at or below their minimum stock.
    pub async fn low_stock_products(&self) -> Result<Vec<Product>, LedgerError> {
        match self.query(LedgerQuery::LowStock).await? {
            LedgerQueryResult::LowStock(products) => Ok(products),
            other => Err(unexpected(other)),
        }
    }

    /// Products expiring within `days_window` days, already expired ones included.
    pub async fn near_expiry_products(&self, days_window: u32) -> Result<Vec<Product>, LedgerError> {
        match self.query(LedgerQuery::NearExpiry(days_window)).await? {
            LedgerQueryResult::NearExpiry(products) => Ok(products),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    async fn query(&self, query: LedgerQuery) -> Result<LedgerQueryResult, LedgerError> {
        debug!("Sending request");
        self.inner.query(query).await.map_err(Self::map_error)
    }
}
