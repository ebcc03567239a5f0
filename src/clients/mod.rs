pub mod mailer;
pub mod sheets;
pub mod stripe;

pub use mailer::Mailer;
pub use sheets::SheetsClient;
pub use stripe::StripeClient;
