use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::application::AccountService;
use crate::domain::{AccountError, CustomerUpdate, NewCustomer};
use crate::infrastructure::AppConfig;
use crate::web::dto::{
    CustomerDto, ErrorResponseDto, ResponseDto, MOBILE_NUMBER_RE,
};

pub const STATUS_201: &str = "201";
pub const MESSAGE_201: &str = "Account created successfully";
pub const STATUS_200: &str = "200";
pub const MESSAGE_200: &str = "Request processed successfully";
pub const STATUS_417: &str = "417";
pub const MESSAGE_417_UPDATE: &str =
    "Update operation failed. Please try again or contact Dev team";
pub const MESSAGE_417_DELETE: &str =
    "Delete operation failed. Please try again or contact Dev team";

pub type AppState = (Arc<AccountService>, Arc<AppConfig>);

/// A workflow or boundary failure, tagged with the path it occurred on so
/// the error envelope can report it.
#[derive(Debug)]
pub struct ApiError {
    api_path: String,
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Every workflow failure surfaces as 500 with the structured error
    /// envelope. Callers distinguish the cases by message, not status.
    pub fn workflow(api_path: &str, err: AccountError) -> Self {
        error!(path = api_path, error = %err, "request failed");
        Self {
            api_path: api_path.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }

    /// Boundary shape violations are rejected before the workflow runs.
    pub fn validation(api_path: &str, errors: ValidationErrors) -> Self {
        Self {
            api_path: api_path.to_string(),
            status: StatusCode::BAD_REQUEST,
            message: flatten_validation_errors(&errors),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponseDto {
            api_path: self.api_path,
            error_code: self.status.as_u16(),
            error_message: self.message,
            error_time: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}

fn flatten_validation_errors(errors: &ValidationErrors) -> String {
    fn collect(errors: &ValidationErrors, messages: &mut Vec<String>) {
        for (field, kind) in errors.errors() {
            match kind {
                ValidationErrorsKind::Field(field_errors) => {
                    for field_error in field_errors {
                        match &field_error.message {
                            Some(message) => messages.push(message.to_string()),
                            None => messages.push(format!("{field} is invalid")),
                        }
                    }
                }
                ValidationErrorsKind::Struct(nested) => collect(nested, messages),
                ValidationErrorsKind::List(nested_list) => {
                    for nested in nested_list.values() {
                        collect(nested, messages);
                    }
                }
            }
        }
    }

    let mut messages = Vec::new();
    collect(errors, &mut messages);
    messages.sort();
    messages.join(", ")
}

#[derive(Debug, Deserialize, Validate)]
pub struct MobileNumberParams {
    #[serde(rename = "mobileNumber")]
    #[validate(regex(path = "MOBILE_NUMBER_RE", message = "Mobile Number should be 10 digits"))]
    pub mobile_number: String,
}

pub async fn create_account(
    State((service, _)): State<AppState>,
    uri: Uri,
    Json(payload): Json<CustomerDto>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::validation(uri.path(), e))?;

    service
        .create_account(NewCustomer::from(payload))
        .await
        .map_err(|e| ApiError::workflow(uri.path(), e))?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::new(STATUS_201, MESSAGE_201)),
    ))
}

pub async fn fetch_account_details(
    State((service, _)): State<AppState>,
    uri: Uri,
    Query(params): Query<MobileNumberParams>,
) -> Result<Json<CustomerDto>, ApiError> {
    params
        .validate()
        .map_err(|e| ApiError::validation(uri.path(), e))?;

    let view = service
        .fetch_account(&params.mobile_number)
        .await
        .map_err(|e| ApiError::workflow(uri.path(), e))?;

    Ok(Json(CustomerDto::from(view)))
}

pub async fn update_account_details(
    State((service, _)): State<AppState>,
    uri: Uri,
    Json(payload): Json<CustomerDto>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::validation(uri.path(), e))?;

    let updated = service
        .update_account(CustomerUpdate::from(payload))
        .await
        .map_err(|e| ApiError::workflow(uri.path(), e))?;

    if updated {
        Ok((
            StatusCode::OK,
            Json(ResponseDto::new(STATUS_200, MESSAGE_200)),
        ))
    } else {
        Ok((
            StatusCode::EXPECTATION_FAILED,
            Json(ResponseDto::new(STATUS_417, MESSAGE_417_UPDATE)),
        ))
    }
}

pub async fn delete_account(
    State((service, _)): State<AppState>,
    uri: Uri,
    Query(params): Query<MobileNumberParams>,
) -> Result<impl IntoResponse, ApiError> {
    params
        .validate()
        .map_err(|e| ApiError::validation(uri.path(), e))?;

    let deleted = service
        .delete_account(&params.mobile_number)
        .await
        .map_err(|e| ApiError::workflow(uri.path(), e))?;

    if deleted {
        Ok((
            StatusCode::OK,
            Json(ResponseDto::new(STATUS_200, MESSAGE_200)),
        ))
    } else {
        Ok((
            StatusCode::EXPECTATION_FAILED,
            Json(ResponseDto::new(STATUS_417, MESSAGE_417_DELETE)),
        ))
    }
}

pub async fn build_info(State((_, config)): State<AppState>) -> impl IntoResponse {
    format!("Current Build Version: {}", config.build_version)
}

pub async fn contact_info(State((_, config)): State<AppState>) -> impl IntoResponse {
    Json(config.contact_info.clone())
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
