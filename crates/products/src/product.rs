//! Product record and input validation.

use serde::{Deserialize, Serialize};

use orderdesk_core::{CategoryId, DomainError, DomainResult, Entity, ProductId};

use crate::category::validate_name;

/// Product record as persisted.
///
/// Price is in the smallest currency unit (e.g. cents) so line totals stay
/// in integer arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub category_id: CategoryId,
}

impl Product {
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.name, self.price)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Input for creating a product; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: u64,
    pub category_id: CategoryId,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.name, self.price)
    }
}

fn validate_fields(name: &str, price: u64) -> DomainResult<()> {
    validate_name(name)?;
    if price == 0 {
        return Err(DomainError::validation("price must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> NewProduct {
        NewProduct {
            name: "Espresso Beans 1kg".to_string(),
            price: 1850,
            category_id: CategoryId::from_i64(1),
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut input = valid_input();
        input.price = 0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut input = valid_input();
        input.name = " ".to_string();
        assert!(input.validate().is_err());
    }
}
