use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sheet title rows are appended to for processed bookings.
pub const BOOKINGS_SHEET: &str = "Bookings";

/// Sheet title the hire-equipment endpoint forwards to.
pub const HIRE_EQUIPMENT_SHEET: &str = "HireEquipment";

/// Raw form submission as posted by the booking frontends.
///
/// Everything is optional here; presence rules live in `validate`, and the
/// frontends are loose about types (ids and counts arrive as numbers or
/// strings), so `id` and `additional_persons_count` stay as raw JSON values
/// until coerced.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Submission {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "type")]
    pub booking_type: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub business_email: Option<String>,
    #[serde(default, rename = "stripeToken")]
    pub stripe_token: Option<String>,
    #[serde(default)]
    pub additional_persons_count: Option<Value>,
    #[serde(default)]
    pub additional_persons: Option<PersonArrays>,
    #[serde(default)]
    pub student_details: Option<PersonFields>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub usi: Option<String>,
}

/// Per-person fields for company bookings, each an ordered array indexed by
/// person position.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonArrays {
    #[serde(default)]
    pub first_name: Vec<String>,
    #[serde(default)]
    pub last_name: Vec<String>,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub phone: Vec<String>,
    #[serde(default)]
    pub gender: Vec<String>,
    #[serde(default)]
    pub usi: Vec<String>,
}

/// A single person's details, used for the `student_details` block.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonFields {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub usi: Option<String>,
}

impl Submission {
    /// Booking id coerced to an integer, however the frontend sent it.
    pub fn booking_id(&self) -> Option<i64> {
        self.id.as_ref().and_then(loose_i64)
    }

    pub fn persons_count(&self) -> Option<i64> {
        self.additional_persons_count.as_ref().and_then(loose_i64)
    }

    pub fn stripe_token(&self) -> &str {
        self.stripe_token.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingType {
    Individual,
    Company,
}

impl BookingType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(BookingType::Individual),
            "company" => Some(BookingType::Company),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Individual => "individual",
            BookingType::Company => "company",
        }
    }
}

/// Which side of the payment/invoice branch a request took. Determines the
/// `status` and `payment_type` overrides stamped on every persisted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Payment,
    Invoice,
}

impl PaymentKind {
    pub fn status(&self) -> &'static str {
        match self {
            PaymentKind::Payment => "completed",
            PaymentKind::Invoice => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentKind::Payment => "payment",
            PaymentKind::Invoice => "invoice",
        }
    }
}

/// Normalized, request-scoped booking record. The price always comes from
/// the catalog resolver; a client-supplied price is never read.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub booking_type: BookingType,
    /// Resolved contact: `email` for individual, `business_email` for company.
    pub email: String,
    /// Billable participant count. `individual` bills exactly the primary
    /// booker (1); `company` bills exactly `additional_persons_count`: the
    /// company contact is not itself a billable unit. A `student_details`
    /// block adds a persisted row but never a billable unit.
    pub participants: i64,
    /// Unit price from the catalog, in major currency units.
    pub price: f64,
    pub stripe_token: String,
}

impl Booking {
    /// Pure assembly of a validated submission plus the resolved price.
    /// Deterministic, no side effects.
    pub fn assemble(submission: &Submission, price: f64) -> Result<Self, String> {
        let id = submission
            .booking_id()
            .ok_or_else(|| "booking id is not numeric".to_string())?;

        let booking_type = submission
            .booking_type
            .as_deref()
            .and_then(BookingType::parse)
            .ok_or_else(|| "booking type is invalid".to_string())?;

        let (email, participants) = match booking_type {
            BookingType::Individual => {
                (submission.email.clone().unwrap_or_default(), 1)
            }
            BookingType::Company => {
                let count = submission.persons_count().ok_or_else(|| {
                    "additional_persons_count is required for company bookings".to_string()
                })?;
                if count < 0 {
                    return Err("additional_persons_count is negative".to_string());
                }
                (submission.business_email.clone().unwrap_or_default(), count)
            }
        };

        Ok(Booking {
            id,
            booking_type,
            email,
            participants,
            price,
            stripe_token: submission.stripe_token().to_string(),
        })
    }

    /// Total charge in major units. The sole place monetary scaling happens.
    pub fn total_price(&self) -> f64 {
        self.price * self.participants as f64
    }

    /// Total charge in the processor's minor unit (cents).
    pub fn total_minor_units(&self) -> i64 {
        (self.total_price() * 100.0).round() as i64
    }
}

/// Integer coercion accepting JSON numbers and numeric strings.
pub fn loose_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Float coercion accepting JSON numbers and numeric strings.
pub fn loose_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fields every row starts from: the submission's own scalar fields (never
/// the nested blocks, never the payment token) plus the resolved-price and
/// status overrides.
fn base_row(submission: &Submission, booking: &Booking, kind: PaymentKind) -> Map<String, Value> {
    let mut row = Map::new();

    if let Some(id) = &submission.id {
        row.insert("id".to_string(), id.clone());
    }
    row.insert(
        "type".to_string(),
        Value::String(booking.booking_type.as_str().to_string()),
    );

    let scalars = [
        ("email", &submission.email),
        ("business_email", &submission.business_email),
        ("first_name", &submission.first_name),
        ("last_name", &submission.last_name),
        ("phone", &submission.phone),
        ("gender", &submission.gender),
        ("usi", &submission.usi),
    ];
    for (key, value) in scalars {
        if let Some(v) = value {
            row.insert(key.to_string(), Value::String(v.clone()));
        }
    }
    if let Some(count) = &submission.additional_persons_count {
        row.insert("additional_persons_count".to_string(), count.clone());
    }

    // Overrides: resolved price wins over anything the client sent.
    row.insert("price".to_string(), Value::from(booking.price));
    row.insert("status".to_string(), Value::String(kind.status().to_string()));
    row.insert(
        "payment_type".to_string(),
        Value::String(kind.label().to_string()),
    );

    row
}

/// Substitute one additional person's indexed fields into a copy of the base
/// row. Missing entries (arrays shorter than the count) are left as-is.
fn person_row(base: &Map<String, Value>, persons: &PersonArrays, index: usize) -> Value {
    let mut row = base.clone();
    let fields = [
        ("first_name", &persons.first_name),
        ("last_name", &persons.last_name),
        ("email", &persons.email),
        ("phone", &persons.phone),
        ("gender", &persons.gender),
        ("usi", &persons.usi),
    ];
    for (key, values) in fields {
        if let Some(v) = values.get(index) {
            row.insert(key.to_string(), Value::String(v.clone()));
        }
    }
    Value::Object(row)
}

fn student_row(base: &Map<String, Value>, student: &PersonFields) -> Value {
    let mut row = base.clone();
    let fields = [
        ("first_name", &student.first_name),
        ("last_name", &student.last_name),
        ("email", &student.email),
        ("phone", &student.phone),
        ("gender", &student.gender),
        ("usi", &student.usi),
    ];
    for (key, value) in fields {
        if let Some(v) = value {
            row.insert(key.to_string(), Value::String(v.clone()));
        }
    }
    Value::Object(row)
}

/// Expand one submission into the flat rows appended to the sheet, one per
/// participant:
///
/// - `individual`: exactly one row for the primary booker;
/// - `company`: one row per additional person, index 0..count-1, with that
///   person's fields substituted in place of the array-valued ones;
/// - either type: one extra row when a `student_details` block is present.
pub fn booking_rows(submission: &Submission, booking: &Booking, kind: PaymentKind) -> Vec<Value> {
    let base = base_row(submission, booking, kind);
    let mut rows = Vec::new();

    match booking.booking_type {
        BookingType::Individual => {
            rows.push(Value::Object(base.clone()));
        }
        BookingType::Company => {
            let empty = PersonArrays::default();
            let persons = submission.additional_persons.as_ref().unwrap_or(&empty);
            for index in 0..booking.participants.max(0) as usize {
                rows.push(person_row(&base, persons, index));
            }
        }
    }

    if let Some(student) = &submission.student_details {
        rows.push(student_row(&base, student));
    }

    rows
}
