use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{
    Account, AccountUpdate, CustomerUpdate, CustomerWithAccount, NewCustomer,
};

pub static MOBILE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Wire shape for account details, nested under the customer payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountsDto {
    #[validate(range(
        min = 1_000_000_000,
        max = 9_999_999_999,
        message = "Account Number must be 10 digits"
    ))]
    pub account_number: i64,
    #[validate(length(min = 1, message = "Account type can not be null or empty"))]
    pub account_type: String,
    #[validate(length(min = 1, message = "Branch address can not be null or empty"))]
    pub branch_address: String,
}

/// Wire shape for customer details. The account sub-object is absent on
/// create requests and optional on update requests.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[validate(length(min = 3, max = 30, message = "Name must be between 3 and 30 characters"))]
    pub name: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: String,
    #[validate(regex(path = "MOBILE_NUMBER_RE", message = "Mobile Number should be 10 digits"))]
    pub mobile_number: String,
    #[validate]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_dto: Option<AccountsDto>,
}

/// Success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub status_code: String,
    pub status_msg: String,
}

impl ResponseDto {
    pub fn new(status_code: &str, status_msg: &str) -> Self {
        Self {
            status_code: status_code.to_string(),
            status_msg: status_msg.to_string(),
        }
    }
}

/// Error envelope: which path failed, with what code, message and time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseDto {
    pub api_path: String,
    pub error_code: u16,
    pub error_message: String,
    pub error_time: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountsDto {
    fn from(account: Account) -> Self {
        Self {
            account_number: account.account_number,
            account_type: account.account_type,
            branch_address: account.branch_address,
        }
    }
}

impl From<CustomerWithAccount> for CustomerDto {
    fn from(view: CustomerWithAccount) -> Self {
        Self {
            name: view.customer.name,
            email: view.customer.email,
            mobile_number: view.customer.mobile_number,
            accounts_dto: Some(AccountsDto::from(view.account)),
        }
    }
}

impl From<CustomerDto> for NewCustomer {
    fn from(dto: CustomerDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            mobile_number: dto.mobile_number,
        }
    }
}

impl From<CustomerDto> for CustomerUpdate {
    fn from(dto: CustomerDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            mobile_number: dto.mobile_number,
            account: dto.accounts_dto.map(|account| AccountUpdate {
                account_number: account.account_number,
                account_type: account.account_type,
                branch_address: account.branch_address,
            }),
        }
    }
}
