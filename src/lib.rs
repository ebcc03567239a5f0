//! Booking payment API: validates a booking form submission, resolves the
//! authoritative price from the spreadsheet-backed catalog, charges or
//! invoices the customer through Stripe, appends one row per participant
//! back to the sheet, and emails a confirmation.

pub mod clients;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notify;
