use async_trait::async_trait;
use sqlx::postgres::PgDatabaseError;
use sqlx::PgPool;
use thiserror::Error;

use crate::domain::{Account, AccountError, Customer, NewAccount, NewCustomer};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Mobile number '{0}' already exists")]
    MobileNumberExists(String),
    #[error("Account number {0} already exists")]
    AccountNumberExists(i64),
    #[error("Customer row missing for id: {0}")]
    CustomerRowMissing(i64),
    #[error("Account row missing for number: {0}")]
    AccountRowMissing(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RepositoryError> for AccountError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::MobileNumberExists(mobile_number) => {
                AccountError::CustomerAlreadyExists(mobile_number)
            }
            other => AccountError::InfrastructureError(other.to_string()),
        }
    }
}

/// Storage port for the account workflow. The paired-write operations run
/// inside a single database transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    async fn find_customer_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, RepositoryError>;

    async fn find_customer_by_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Customer>, RepositoryError>;

    async fn find_account_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, RepositoryError>;

    async fn find_account_by_number(
        &self,
        account_number: i64,
    ) -> Result<Option<Account>, RepositoryError>;

    async fn create_customer_with_account(
        &self,
        customer: &NewCustomer,
        account: &NewAccount,
    ) -> Result<(Customer, Account), RepositoryError>;

    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
    ) -> Result<(), RepositoryError>;

    async fn delete_customer_and_account(
        &self,
        customer_id: i64,
    ) -> Result<(), RepositoryError>;
}

const SELECT_CUSTOMER: &str = r#"
    SELECT customer_id, name, email, mobile_number, created_at, updated_at
    FROM customer
"#;

const SELECT_ACCOUNT: &str = r#"
    SELECT account_number, customer_id, account_type, branch_address, created_at, updated_at
    FROM accounts
"#;

#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a Postgres unique violation (23505) to the matching domain-level
/// conflict, by constraint name. Anything else stays a database error.
fn map_unique_violation(
    e: sqlx::Error,
    mobile_number: &str,
    account_number: Option<i64>,
) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if let Some(pg_err) = db_err.try_downcast_ref::<PgDatabaseError>() {
            if pg_err.code() == "23505" {
                match pg_err.constraint() {
                    Some("customer_mobile_number_key") => {
                        return RepositoryError::MobileNumberExists(mobile_number.to_string());
                    }
                    Some("accounts_pkey") => {
                        if let Some(number) = account_number {
                            return RepositoryError::AccountNumberExists(number);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl AccountRepositoryTrait for PostgresAccountRepository {
    async fn find_customer_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            &format!("{SELECT_CUSTOMER} WHERE mobile_number = $1"),
        )
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn find_customer_by_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer =
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE customer_id = $1"))
                .bind(customer_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(customer)
    }

    async fn find_account_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, RepositoryError> {
        let account =
            sqlx::query_as::<_, Account>(&format!("{SELECT_ACCOUNT} WHERE customer_id = $1"))
                .bind(customer_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(account)
    }

    async fn find_account_by_number(
        &self,
        account_number: i64,
    ) -> Result<Option<Account>, RepositoryError> {
        let account =
            sqlx::query_as::<_, Account>(&format!("{SELECT_ACCOUNT} WHERE account_number = $1"))
                .bind(account_number)
                .fetch_optional(&self.pool)
                .await?;
        Ok(account)
    }

    async fn create_customer_with_account(
        &self,
        customer: &NewCustomer,
        account: &NewAccount,
    ) -> Result<(Customer, Account), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let saved_customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customer (name, email, mobile_number)
            VALUES ($1, $2, $3)
            RETURNING customer_id, name, email, mobile_number, created_at, updated_at
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.mobile_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &customer.mobile_number, None))?;

        let saved_account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (account_number, customer_id, account_type, branch_address)
            VALUES ($1, $2, $3, $4)
            RETURNING account_number, customer_id, account_type, branch_address, created_at, updated_at
            "#,
        )
        .bind(account.account_number)
        .bind(saved_customer.customer_id)
        .bind(&account.account_type)
        .bind(&account.branch_address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, &customer.mobile_number, Some(account.account_number))
        })?;

        tx.commit().await?;
        Ok((saved_customer, saved_account))
    }

    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET account_type = $1, branch_address = $2, updated_at = now()
            WHERE account_number = $3
            "#,
        )
        .bind(&account.account_type)
        .bind(&account.branch_address)
        .bind(account.account_number)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::AccountRowMissing(account.account_number));
        }

        let result = sqlx::query(
            r#"
            UPDATE customer
            SET name = $1, email = $2, mobile_number = $3, updated_at = now()
            WHERE customer_id = $4
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.mobile_number)
        .bind(customer.customer_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &customer.mobile_number, None))?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::CustomerRowMissing(customer.customer_id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_customer_and_account(
        &self,
        customer_id: i64,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM accounts WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM customer WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
