//! The booking-payment endpoints.
//!
//! `process_payment` is the whole pipeline: validate, resolve the price,
//! assemble the booking, charge or invoice, persist one row per participant,
//! email a summary. Validation, pricing, and charging failures surface to
//! the caller; row persistence and email are best-effort.

use actix_web::{Either, HttpResponse, web};
use serde_json::{Value, json};

use crate::clients::{Mailer, SheetsClient, StripeClient};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::booking::{
    BOOKINGS_SHEET, Booking, HIRE_EQUIPMENT_SHEET, PaymentKind, Submission, booking_rows,
};
use crate::models::validate::validate_submission;
use crate::notify;

/// POST /processPayment
///
/// Accepts JSON or urlencoded form bodies. Urlencoded submissions carry the
/// flat fields only; the nested per-person and student blocks need JSON.
pub async fn process_payment(
    config: web::Data<AppConfig>,
    sheets: web::Data<SheetsClient>,
    stripe: web::Data<StripeClient>,
    mailer: web::Data<Mailer>,
    body: Either<web::Json<Submission>, web::Form<Submission>>,
) -> Result<HttpResponse, AppError> {
    let submission = body.into_inner();

    let violations = validate_submission(&submission);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let id = submission
        .booking_id()
        .ok_or_else(|| AppError::Submission("booking id is not numeric".to_string()))?;

    // Authoritative price; whatever the client sent is ignored.
    let price = sheets.resolve_price(id).await?;

    let booking = Booking::assemble(&submission, price).map_err(AppError::Submission)?;

    let kind = if booking.stripe_token.is_empty() {
        PaymentKind::Invoice
    } else {
        PaymentKind::Payment
    };

    if kind == PaymentKind::Payment {
        let customer = stripe
            .create_customer(&booking.email, &booking.stripe_token)
            .await?;
        let description = format!(
            "Payment for booking id: {} with price of {} for {} person(s)",
            booking.id, booking.price, booking.participants
        );
        let charge = stripe
            .create_charge(
                booking.total_minor_units(),
                &config.currency,
                &customer.id,
                &description,
            )
            .await?;
        log::info!(
            "charged {} {} for booking {} (charge {})",
            charge.amount,
            config.currency,
            booking.id,
            charge.id
        );
    } else {
        log::info!("booking {} submitted for invoicing", booking.id);
    }

    // Best-effort from here on: a paying customer is never blocked by a
    // failed row append or a bounced email.
    let rows = booking_rows(&submission, &booking, kind);
    for (index, row) in rows.iter().enumerate() {
        if let Err(e) = sheets.append_row(BOOKINGS_SHEET, row).await {
            log::warn!("row {index} append failed for booking {}: {e}", booking.id);
        }
    }

    send_notification(&config, &mailer, &submission, &booking, kind).await;

    Ok(HttpResponse::Ok().json(json!({ "message": "OK. Successfully processed payment!" })))
}

async fn send_notification(
    config: &AppConfig,
    mailer: &Mailer,
    submission: &Submission,
    booking: &Booking,
    kind: PaymentKind,
) {
    let subject = match kind {
        PaymentKind::Payment => {
            format!("{}: booking #{} payment received", config.app_name, booking.id)
        }
        PaymentKind::Invoice => {
            format!("{}: booking #{} invoice request", config.app_name, booking.id)
        }
    };

    let html = match notify::render_email(submission, &subject) {
        Ok(html) => html,
        Err(e) => {
            log::warn!("email render failed for booking {}: {e}", booking.id);
            return;
        }
    };

    if let Err(e) = mailer.send(&booking.email, &subject, &html).await {
        log::warn!("notification email failed for booking {}: {e}", booking.id);
    }
}

/// POST /hireEquipment: forwards the body verbatim to the hire sheet.
pub async fn hire_equipment(
    sheets: web::Data<SheetsClient>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    sheets
        .append_row(HIRE_EQUIPMENT_SHEET, &body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Success!" })))
}
