use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Account type assigned to every newly provisioned account.
pub const DEFAULT_ACCOUNT_TYPE: &str = "Savings";

/// Branch address assigned to every newly provisioned account.
pub const DEFAULT_BRANCH_ADDRESS: &str = "123 Main Street, New York";

/// A bank account. One account per customer; the account number is the
/// primary key and immutable after creation, as is the owning customer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub account_number: i64,
    pub customer_id: i64,
    pub account_type: String,
    pub branch_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Account fields for an insert. The owning customer id is resolved inside
/// the same transaction that creates the customer row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub account_number: i64,
    pub account_type: String,
    pub branch_address: String,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Customer already registered with the mobile number: {0}")]
    CustomerAlreadyExists(String),
    #[error("{resource} not found with the given input data {field}: '{value}'")]
    ResourceNotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

impl AccountError {
    pub fn not_found(
        resource: &'static str,
        field: &'static str,
        value: impl ToString,
    ) -> Self {
        AccountError::ResourceNotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }
}
