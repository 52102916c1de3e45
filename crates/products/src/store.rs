//! Catalog store port and the CRUD service over it.

use std::sync::Arc;

use orderdesk_core::{CategoryId, DomainError, DomainResult, ProductId, StoreError, StoreResult};

use crate::category::{Category, NewCategory};
use crate::product::{NewProduct, Product};

/// Persistence port for the catalog; implemented by the gateway.
pub trait CatalogStore: Send + Sync {
    fn category(&self, id: CategoryId) -> Option<Category>;
    fn categories(&self) -> Vec<Category>;
    /// Insert with a store-assigned id; returns the persisted record.
    fn add_category(&self, new: NewCategory) -> Category;
    fn update_category(&self, category: Category) -> StoreResult<()>;
    /// Restricted while any product references the category.
    fn remove_category(&self, id: CategoryId) -> StoreResult<()>;

    fn product(&self, id: ProductId) -> Option<Product>;
    fn products(&self) -> Vec<Product>;
    /// Insert with a store-assigned id; the category reference must exist.
    fn add_product(&self, new: NewProduct) -> StoreResult<Product>;
    fn update_product(&self, product: Product) -> StoreResult<()>;
    /// Restricted while any line item references the product.
    fn remove_product(&self, id: ProductId) -> StoreResult<()>;
}

/// CRUD passthrough over the catalog port.
pub struct ProductCatalog {
    store: Arc<dyn CatalogStore>,
}

impl ProductCatalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.store.category(id)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.store.categories()
    }

    pub fn create_category(&self, new: NewCategory) -> DomainResult<Category> {
        new.validate()?;
        Ok(self.store.add_category(new))
    }

    pub fn update_category(&self, category: Category) -> DomainResult<()> {
        category.validate()?;
        self.store.update_category(category).map_err(reference_error)
    }

    pub fn delete_category(&self, id: CategoryId) -> DomainResult<()> {
        self.store.remove_category(id).map_err(removal_error)
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.store.product(id)
    }

    pub fn products(&self) -> Vec<Product> {
        self.store.products()
    }

    pub fn create_product(&self, new: NewProduct) -> DomainResult<Product> {
        new.validate()?;
        self.store.add_product(new).map_err(reference_error)
    }

    pub fn update_product(&self, product: Product) -> DomainResult<()> {
        product.validate()?;
        self.store.update_product(product).map_err(reference_error)
    }

    pub fn delete_product(&self, id: ProductId) -> DomainResult<()> {
        self.store.remove_product(id).map_err(removal_error)
    }
}

/// A write referenced a missing row: the caller sent bad input.
fn reference_error(err: StoreError) -> DomainError {
    match err {
        StoreError::NotFound { .. } => DomainError::NotFound,
        StoreError::ForeignKey(msg) => DomainError::validation(msg),
        other => DomainError::conflict(other.to_string()),
    }
}

/// A delete hit a row that is still referenced: restrict, surfaced as a
/// conflict rather than a validation failure.
fn removal_error(err: StoreError) -> DomainError {
    match err {
        StoreError::NotFound { .. } => DomainError::NotFound,
        StoreError::ForeignKey(msg) => DomainError::conflict(msg),
        other => DomainError::conflict(other.to_string()),
    }
}
