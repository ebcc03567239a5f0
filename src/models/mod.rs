pub mod booking;
pub mod validate;
