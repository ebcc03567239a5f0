//! Presence and shape checks for incoming submissions.
//!
//! Each rule is evaluated independently: a submission missing three fields
//! reports three violations in one response.

use crate::errors::ValidationError;
use crate::models::booking::{BookingType, Submission};

fn check_id(submission: &Submission) -> Option<ValidationError> {
    if submission.id.is_none() {
        return Some(ValidationError::new("id", "Booking ID is required!"));
    }
    None
}

/// The token field must exist; an empty string is legal and selects the
/// invoice path.
fn check_stripe_token(submission: &Submission) -> Option<ValidationError> {
    if submission.stripe_token.is_none() {
        return Some(ValidationError::new("stripeToken", "Stripe token is required!"));
    }
    None
}

fn check_type(submission: &Submission) -> Option<ValidationError> {
    let valid = submission
        .booking_type
        .as_deref()
        .and_then(BookingType::parse)
        .is_some();
    if !valid {
        return Some(ValidationError::new("type", "Booking type is invalid!"));
    }
    None
}

/// `email` is required only for individual bookings; for any other type the
/// rule passes regardless of the field.
fn check_email(submission: &Submission) -> Option<ValidationError> {
    if submission.booking_type.as_deref() == Some("individual")
        && submission.email.as_deref().unwrap_or("").is_empty()
    {
        return Some(ValidationError::new(
            "email",
            "Email is required for individual type!",
        ));
    }
    None
}

fn check_business_email(submission: &Submission) -> Option<ValidationError> {
    if submission.booking_type.as_deref() == Some("company")
        && submission.business_email.as_deref().unwrap_or("").is_empty()
    {
        return Some(ValidationError::new(
            "business_email",
            "Business email is required for company type!",
        ));
    }
    None
}

/// Run every rule and collect the violations. Empty means valid; a non-empty
/// result must abort the request before any external call.
pub fn validate_submission(submission: &Submission) -> Vec<ValidationError> {
    [
        check_id(submission),
        check_stripe_token(submission),
        check_type(submission),
        check_email(submission),
        check_business_email(submission),
    ]
    .into_iter()
    .flatten()
    .collect()
}
