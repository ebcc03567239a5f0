//! Submission validation tests — covers the presence rules and their
//! independence (every failed rule reports, no short-circuit).

use serde_json::json;

use zokal_booking_api::models::booking::Submission;
use zokal_booking_api::models::validate::validate_submission;

fn submission(value: serde_json::Value) -> Submission {
    serde_json::from_value(value).expect("Failed to deserialize submission")
}

fn params(errors: &[zokal_booking_api::errors::ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.param.as_str()).collect()
}

#[test]
fn test_empty_submission_reports_each_rule() {
    let sub = submission(json!({}));
    let errors = validate_submission(&sub);

    // email/business_email rules only apply once a type is chosen.
    assert_eq!(params(&errors), vec!["id", "stripeToken", "type"]);
}

#[test]
fn test_invalid_type_is_rejected() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_visa",
        "type": "partnership"
    }));
    let errors = validate_submission(&sub);
    assert_eq!(params(&errors), vec!["type"]);
}

#[test]
fn test_individual_requires_email() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_visa",
        "type": "individual",
        "email": ""
    }));
    let errors = validate_submission(&sub);
    assert_eq!(params(&errors), vec!["email"]);
    assert_eq!(errors[0].msg, "Email is required for individual type!");
}

#[test]
fn test_individual_with_email_passes_without_business_email() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_visa",
        "type": "individual",
        "email": "jane@example.com"
    }));
    assert!(validate_submission(&sub).is_empty());
}

#[test]
fn test_company_requires_business_email() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_visa",
        "type": "company",
        "email": "jane@example.com"
    }));
    let errors = validate_submission(&sub);
    assert_eq!(params(&errors), vec!["business_email"]);
}

#[test]
fn test_company_with_business_email_passes() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_visa",
        "type": "company",
        "business_email": "accounts@acme.example"
    }));
    assert!(validate_submission(&sub).is_empty());
}

#[test]
fn test_empty_stripe_token_is_valid() {
    // Empty string means "invoice request", which is a legal submission.
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "",
        "type": "individual",
        "email": "jane@example.com"
    }));
    assert!(validate_submission(&sub).is_empty());
}

#[test]
fn test_string_id_counts_as_present() {
    let sub = submission(json!({
        "id": "5",
        "stripeToken": "tok_visa",
        "type": "individual",
        "email": "jane@example.com"
    }));
    assert!(validate_submission(&sub).is_empty());
}
