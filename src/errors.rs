use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::clients::sheets::SheetsError;
use crate::clients::stripe::StripeError;

/// One failed validation rule, reported back to the caller as
/// `{ "param": ..., "msg": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub param: String,
    pub msg: String,
}

impl ValidationError {
    pub fn new(param: &str, msg: &str) -> Self {
        ValidationError {
            param: param.to_string(),
            msg: msg.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    /// Field-level violations; maps to 422 with the full list.
    Validation(Vec<ValidationError>),
    /// A field passed presence checks but is unusable (e.g. non-numeric id).
    Submission(String),
    Sheets(SheetsError),
    Stripe(StripeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation failed ({} errors)", errors.len()),
            AppError::Submission(msg) => write!(f, "Bad submission: {msg}"),
            AppError::Sheets(e) => write!(f, "Booking API error: {e}"),
            AppError::Stripe(e) => write!(f, "Payment error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({ "errors": errors }))
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": self.to_string() }))
            }
        }
    }
}

impl From<SheetsError> for AppError {
    fn from(e: SheetsError) -> Self {
        AppError::Sheets(e)
    }
}

impl From<StripeError> for AppError {
    fn from(e: StripeError) -> Self {
        AppError::Stripe(e)
    }
}
