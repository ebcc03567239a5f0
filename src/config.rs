/// Runtime configuration, read once from the environment at startup.
///
/// Every value has a development-friendly default; missing secrets are
/// logged as warnings rather than aborting, since the invoice path and
/// validation still work without them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Base URL of the spreadsheet-backed booking API (catalog + row store).
    pub booking_api_url: String,
    pub stripe_secret: String,
    /// ISO currency code for charges, e.g. "AUD".
    pub currency: String,
    pub app_name: String,
    /// From-address for outgoing mail.
    pub app_email: String,
    /// Extra recipients cc'd on every notification.
    pub app_recipients: Vec<String>,
    pub mailgun_domain: String,
    pub mailgun_api_key: String,
}

const DEFAULT_BOOKING_API_URL: &str = "http://zokal-googlesheets-api.webriq.com/sheet";

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) if !val.is_empty() => val,
        _ => default.to_string(),
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(val) => val.parse().unwrap_or_else(|_| {
                log::warn!("PORT '{val}' is not a valid port — using 3000");
                3000
            }),
            Err(_) => 3000,
        };

        let stripe_secret = env_or("STRIPE_SECRET", "");
        if stripe_secret.is_empty() {
            log::warn!("No STRIPE_SECRET set — the payment path will fail at the processor");
        }

        let mailgun_api_key = env_or("MAILGUN_API_KEY", "");
        if mailgun_api_key.is_empty() {
            log::warn!("No MAILGUN_API_KEY set — notification emails will not be delivered");
        }

        let app_recipients = env_or("APP_RECIPIENTS", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        AppConfig {
            port,
            booking_api_url: env_or("BOOKING_API_URL", DEFAULT_BOOKING_API_URL),
            stripe_secret,
            currency: env_or("APP_BOOKING_CURRENCY", "AUD"),
            app_name: env_or("APP_NAME", "Zokal Bookings"),
            app_email: env_or("APP_EMAIL", "bookings@zokal.com.au"),
            app_recipients,
            mailgun_domain: env_or("MAILGUN_DOMAIN", ""),
            mailgun_api_key,
        }
    }
}
