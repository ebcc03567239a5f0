//! Notification rendering tests — label casing, internal-field exclusion,
//! and expansion of nested student/person blocks.

use serde_json::json;

use zokal_booking_api::models::booking::Submission;
use zokal_booking_api::notify::{render_email, summary_fields, title_case};

fn submission(value: serde_json::Value) -> Submission {
    serde_json::from_value(value).expect("Failed to deserialize submission")
}

#[test]
fn test_title_case_converts_snake_case() {
    assert_eq!(title_case("first_name"), "First Name");
    assert_eq!(title_case("usi"), "Usi");
    assert_eq!(title_case("business_email"), "Business Email");
}

#[test]
fn test_summary_excludes_payment_token() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_secret",
        "type": "individual",
        "email": "jane@example.com"
    }));
    let fields = summary_fields(&sub);

    assert!(fields.iter().any(|(label, _)| label == "Id"));
    assert!(fields.iter().any(|(label, value)| label == "Email" && value == "jane@example.com"));
    assert!(!fields.iter().any(|(_, value)| value.contains("tok_secret")));
}

#[test]
fn test_additional_persons_indexed_from_one() {
    let sub = submission(json!({
        "id": 7,
        "stripeToken": "",
        "type": "company",
        "business_email": "accounts@acme.example",
        "additional_persons_count": 2,
        "additional_persons": {
            "first_name": ["Alice", "Bob"],
            "last_name": ["Smith", "Jones"]
        }
    }));
    let fields = summary_fields(&sub);

    assert!(fields.contains(&("Additional Person 1 First Name".to_string(), "Alice".to_string())));
    assert!(fields.contains(&("Additional Person 2 Last Name".to_string(), "Jones".to_string())));
}

#[test]
fn test_student_details_get_their_own_labels() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_visa",
        "type": "individual",
        "email": "jane@example.com",
        "student_details": {
            "first_name": "Sam",
            "usi": "USI9"
        }
    }));
    let fields = summary_fields(&sub);

    assert!(fields.contains(&("Student Details First Name".to_string(), "Sam".to_string())));
    assert!(fields.contains(&("Student Details Usi".to_string(), "USI9".to_string())));
}

#[test]
fn test_render_email_produces_labeled_html() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "tok_visa",
        "type": "individual",
        "email": "jane@example.com"
    }));
    let html = render_email(&sub, "Booking #5 payment received")
        .expect("Failed to render email");

    assert!(html.contains("Booking #5 payment received"));
    assert!(html.contains("<strong>Email:</strong> jane@example.com"));
    assert!(!html.contains("tok_visa"));
}

#[test]
fn test_render_email_escapes_html_in_values() {
    let sub = submission(json!({
        "id": 5,
        "stripeToken": "",
        "type": "individual",
        "email": "jane@example.com",
        "first_name": "<script>alert(1)</script>"
    }));
    let html = render_email(&sub, "heading").expect("Failed to render email");
    assert!(!html.contains("<script>"));
}
