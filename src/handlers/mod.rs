pub mod booking_handlers;
