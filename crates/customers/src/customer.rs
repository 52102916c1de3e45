//! Customer record and input validation.

use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, DomainError, DomainResult, Entity};

/// Field bounds carried by the persisted schema.
const NAME_MAX: usize = 100;
const ADDRESS_MAX: usize = 100;
const PHONE_MAX: usize = 15;

/// Customer record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Customer {
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.name, &self.address, &self.phone)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

/// Input for registering a customer; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl NewCustomer {
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.name, &self.address, &self.phone)
    }
}

fn validate_fields(name: &str, address: &str, phone: &str) -> DomainResult<()> {
    require_text("name", name, NAME_MAX)?;
    require_text("address", address, ADDRESS_MAX)?;
    require_text("phone", phone, PHONE_MAX)?;
    Ok(())
}

fn require_text(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> NewCustomer {
        NewCustomer {
            name: "Acme Retail".to_string(),
            address: "12 Market Street".to_string(),
            phone: "555-0101".to_string(),
        }
    }

    #[test]
    fn valid_customer_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut input = valid_input();
        input.name = "   ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn overlong_phone_is_rejected() {
        let mut input = valid_input();
        input.phone = "0".repeat(16);
        assert!(input.validate().is_err());
    }

    #[test]
    fn name_at_limit_passes() {
        let mut input = valid_input();
        input.name = "n".repeat(100);
        assert!(input.validate().is_ok());
    }
}
