use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entities::emails;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: i32,
    pub email_name: String,
    pub domain_name: String,
    pub user_id: i32,
}

impl Email {
    /// Renders as `local@domain`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}@{}", self.email_name, self.domain_name)
    }
}

impl From<emails::Model> for Email {
    fn from(model: emails::Model) -> Self {
        Self {
            id: model.id,
            email_name: model.email_name,
            domain_name: model.domain_name,
            user_id: model.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmail {
    pub email_name: String,
    pub domain_name: String,
}

impl NewEmail {
    /// Splits `local@domain` into its parts. Returns `None` unless the
    /// address has exactly one `@` with non-empty parts on both sides.
    #[must_use]
    pub fn parse(address: &str) -> Option<Self> {
        let (email_name, domain_name) = address.split_once('@')?;
        if email_name.is_empty() || domain_name.is_empty() || domain_name.contains('@') {
            return None;
        }
        Some(Self {
            email_name: email_name.to_string(),
            domain_name: domain_name.to_string(),
        })
    }

    pub(crate) fn into_active_model(self, user_id: i32) -> emails::ActiveModel {
        emails::ActiveModel {
            email_name: Set(self.email_name),
            domain_name: Set(self.domain_name),
            user_id: Set(user_id),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let email = NewEmail::parse("alice@yahoo.com").unwrap();
        assert_eq!(email.email_name, "alice");
        assert_eq!(email.domain_name, "yahoo.com");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(NewEmail::parse("alice").is_none());
        assert!(NewEmail::parse("@yahoo.com").is_none());
        assert!(NewEmail::parse("alice@").is_none());
        assert!(NewEmail::parse("alice@x@y").is_none());
    }
}
