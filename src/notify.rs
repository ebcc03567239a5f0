//! Email body rendering: flattens a submission into labeled values and
//! renders them through the confirmation template.

use askama::Template;

use crate::models::booking::{PersonArrays, PersonFields, Submission};

#[derive(Template)]
#[template(path = "email/booking_confirmation.html")]
pub struct BookingEmail {
    pub heading: String,
    pub fields: Vec<(String, String)>,
}

/// `snake_case` field name to a human title, e.g. "first_name" -> "First Name".
pub fn title_case(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_scalar(fields: &mut Vec<(String, String)>, name: &str, value: &Option<String>) {
    if let Some(v) = value {
        if !v.is_empty() {
            fields.push((title_case(name), v.clone()));
        }
    }
}

fn push_student(fields: &mut Vec<(String, String)>, student: &PersonFields) {
    let entries = [
        ("first_name", &student.first_name),
        ("last_name", &student.last_name),
        ("email", &student.email),
        ("phone", &student.phone),
        ("gender", &student.gender),
        ("usi", &student.usi),
    ];
    for (name, value) in entries {
        if let Some(v) = value {
            if !v.is_empty() {
                fields.push((format!("Student Details {}", title_case(name)), v.clone()));
            }
        }
    }
}

fn push_persons(fields: &mut Vec<(String, String)>, persons: &PersonArrays) {
    let entries = [
        ("first_name", &persons.first_name),
        ("last_name", &persons.last_name),
        ("email", &persons.email),
        ("phone", &persons.phone),
        ("gender", &persons.gender),
        ("usi", &persons.usi),
    ];
    let count = entries.iter().map(|(_, values)| values.len()).max().unwrap_or(0);
    // Participant positions are 1-based in the email.
    for index in 0..count {
        for (name, values) in &entries {
            if let Some(v) = values.get(index) {
                if !v.is_empty() {
                    fields.push((
                        format!("Additional Person {} {}", index + 1, title_case(name)),
                        v.clone(),
                    ));
                }
            }
        }
    }
}

/// Label/value pairs summarizing a submission. Internal-only fields (the
/// payment token, the raw nested blocks) are excluded; nested student and
/// additional-person details are expanded into their own labeled entries.
pub fn summary_fields(submission: &Submission) -> Vec<(String, String)> {
    let mut fields = Vec::new();

    if let Some(id) = &submission.id {
        let display = match id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        fields.push(("Id".to_string(), display));
    }
    push_scalar(&mut fields, "type", &submission.booking_type);
    push_scalar(&mut fields, "email", &submission.email);
    push_scalar(&mut fields, "business_email", &submission.business_email);
    push_scalar(&mut fields, "first_name", &submission.first_name);
    push_scalar(&mut fields, "last_name", &submission.last_name);
    push_scalar(&mut fields, "phone", &submission.phone);
    push_scalar(&mut fields, "gender", &submission.gender);
    push_scalar(&mut fields, "usi", &submission.usi);
    if let Some(count) = submission.persons_count() {
        fields.push(("Additional Persons Count".to_string(), count.to_string()));
    }

    if let Some(student) = &submission.student_details {
        push_student(&mut fields, student);
    }
    if let Some(persons) = &submission.additional_persons {
        push_persons(&mut fields, persons);
    }

    fields
}

pub fn render_email(submission: &Submission, heading: &str) -> Result<String, askama::Error> {
    let email = BookingEmail {
        heading: heading.to_string(),
        fields: summary_fields(submission),
    };
    email.render()
}
