use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::account::Account;

/// A bank customer, uniquely identified by mobile number.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Customer fields for an insert. The identifier and audit columns are
/// assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
}

/// Read-only combined view returned by the fetch operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerWithAccount {
    pub customer: Customer,
    pub account: Account,
}

/// Incoming state for the update workflow. The account part is optional;
/// when it is absent the update is reported as not performed rather than
/// failing.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub account: Option<AccountUpdate>,
}

/// The mutable account fields. Account number identifies the row and is
/// never changed itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountUpdate {
    pub account_number: i64,
    pub account_type: String,
    pub branch_address: String,
}
