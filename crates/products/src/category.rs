//! Category record and input validation.

use serde::{Deserialize, Serialize};

use orderdesk_core::{CategoryId, DomainError, DomainResult, Entity};

const NAME_MAX: usize = 50;

/// Category record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

/// Input for creating a category; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)
    }
}

pub(crate) fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name is required"));
    }
    if name.chars().count() > NAME_MAX {
        return Err(DomainError::validation(format!(
            "name must be at most {NAME_MAX} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_name_passes() {
        assert!(NewCategory { name: "Beverages".to_string() }.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(NewCategory { name: "".to_string() }.validate().is_err());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "c".repeat(51);
        assert!(NewCategory { name }.validate().is_err());
    }
}
