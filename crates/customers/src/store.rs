//! Customer store port and the CRUD service over it.

use std::sync::Arc;

use orderdesk_core::{CustomerId, DomainError, DomainResult, StoreError, StoreResult};

use crate::customer::{Customer, NewCustomer};

/// Persistence port for customers; implemented by the gateway.
pub trait CustomerStore: Send + Sync {
    fn customer(&self, id: CustomerId) -> Option<Customer>;
    fn customers(&self) -> Vec<Customer>;
    /// Insert with a store-assigned id; returns the persisted record.
    fn add_customer(&self, new: NewCustomer) -> Customer;
    fn update_customer(&self, customer: Customer) -> StoreResult<()>;
    /// Restricted while any order references the customer.
    fn remove_customer(&self, id: CustomerId) -> StoreResult<()>;
}

/// CRUD passthrough over the customer port.
pub struct CustomerDirectory {
    store: Arc<dyn CustomerStore>,
}

impl CustomerDirectory {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, id: CustomerId) -> Option<Customer> {
        self.store.customer(id)
    }

    pub fn list(&self) -> Vec<Customer> {
        self.store.customers()
    }

    pub fn create(&self, new: NewCustomer) -> DomainResult<Customer> {
        new.validate()?;
        Ok(self.store.add_customer(new))
    }

    pub fn update(&self, customer: Customer) -> DomainResult<()> {
        customer.validate()?;
        self.store.update_customer(customer).map_err(store_to_domain)
    }

    pub fn delete(&self, id: CustomerId) -> DomainResult<()> {
        self.store.remove_customer(id).map_err(store_to_domain)
    }
}

fn store_to_domain(err: StoreError) -> DomainError {
    match err {
        StoreError::NotFound { .. } => DomainError::NotFound,
        StoreError::ForeignKey(msg) => DomainError::conflict(msg),
        other => DomainError::conflict(other.to_string()),
    }
}
