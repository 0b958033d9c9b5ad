use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::domain::{
    AccountError, CustomerUpdate, CustomerWithAccount, NewAccount, NewCustomer,
    DEFAULT_ACCOUNT_TYPE, DEFAULT_BRANCH_ADDRESS,
};
use crate::infrastructure::repository::AccountRepositoryTrait;

/// Orchestrates the paired customer/account workflow: enforces the
/// mobile-number uniqueness precondition and runs every two-table write
/// through a single repository transaction.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Creates a customer together with a freshly provisioned savings
    /// account. Fails without mutating anything when the mobile number is
    /// already registered.
    pub async fn create_account(&self, customer: NewCustomer) -> Result<(), AccountError> {
        if let Some(existing) = self
            .repository
            .find_customer_by_mobile_number(&customer.mobile_number)
            .await?
        {
            return Err(AccountError::CustomerAlreadyExists(existing.mobile_number));
        }

        let account = NewAccount {
            account_number: generate_account_number(),
            account_type: DEFAULT_ACCOUNT_TYPE.to_string(),
            branch_address: DEFAULT_BRANCH_ADDRESS.to_string(),
        };

        let (customer, account) = self
            .repository
            .create_customer_with_account(&customer, &account)
            .await?;
        info!(
            customer_id = customer.customer_id,
            account_number = account.account_number,
            "created customer and account"
        );
        Ok(())
    }

    /// Fetches the combined customer + account view by mobile number. A
    /// customer without an account is a data-integrity gap and reports as
    /// a missing Account.
    pub async fn fetch_account(
        &self,
        mobile_number: &str,
    ) -> Result<CustomerWithAccount, AccountError> {
        let customer = self
            .repository
            .find_customer_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AccountError::not_found("Customer", "mobileNumber", mobile_number))?;

        let account = self
            .repository
            .find_account_by_customer_id(customer.customer_id)
            .await?
            .ok_or_else(|| {
                AccountError::not_found("Account", "customerId", customer.customer_id)
            })?;

        Ok(CustomerWithAccount { customer, account })
    }

    /// Applies the updatable account fields (type, branch address) and the
    /// owning customer's fields (name, email, mobile number) as one logical
    /// operation. Returns `Ok(false)` without touching anything when no
    /// account payload was supplied.
    pub async fn update_account(&self, update: CustomerUpdate) -> Result<bool, AccountError> {
        let Some(account_update) = update.account else {
            return Ok(false);
        };

        let mut account = self
            .repository
            .find_account_by_number(account_update.account_number)
            .await?
            .ok_or_else(|| {
                AccountError::not_found("Account", "accountNumber", account_update.account_number)
            })?;
        account.account_type = account_update.account_type;
        account.branch_address = account_update.branch_address;

        let mut customer = self
            .repository
            .find_customer_by_id(account.customer_id)
            .await?
            .ok_or_else(|| {
                AccountError::not_found("Customer", "customerId", account.customer_id)
            })?;
        customer.name = update.name;
        customer.email = update.email;
        customer.mobile_number = update.mobile_number;

        self.repository
            .update_customer_and_account(&customer, &account)
            .await?;
        info!(
            customer_id = customer.customer_id,
            account_number = account.account_number,
            "updated customer and account"
        );
        Ok(true)
    }

    /// Deletes the account and then the customer, located by mobile number.
    pub async fn delete_account(&self, mobile_number: &str) -> Result<bool, AccountError> {
        let customer = self
            .repository
            .find_customer_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AccountError::not_found("Customer", "mobileNumber", mobile_number))?;

        self.repository
            .delete_customer_and_account(customer.customer_id)
            .await?;
        info!(
            customer_id = customer.customer_id,
            "deleted customer and account"
        );
        Ok(true)
    }
}

/// Random 10-digit account number. The range has no collision detection; a
/// duplicate surfaces as a primary-key violation on insert.
fn generate_account_number() -> i64 {
    1_000_000_000 + rand::thread_rng().gen_range(0..900_000_000i64)
}
