//! Outgoing mail via the Mailgun messages API.
//!
//! Delivery is best-effort by design: callers log a send failure and move
//! on; the HTTP response to the booker never waits on email.

use thiserror::Error;

use crate::config::AppConfig;

const MAILGUN_API_BASE: &str = "https://api.mailgun.net/v3";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mailgun API error ({status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct Mailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
    cc: Vec<String>,
    messages_url: String,
}

impl Mailer {
    pub fn new(config: &AppConfig, http: reqwest::Client) -> Self {
        Mailer {
            http,
            api_key: config.mailgun_api_key.clone(),
            from: format!("{} <{}>", config.app_name, config.app_email),
            cc: config.app_recipients.clone(),
            messages_url: format!("{MAILGUN_API_BASE}/{}/messages", config.mailgun_domain),
        }
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    /// Point the client at a different messages endpoint. Used by tests.
    pub fn with_messages_url(mut self, url: &str) -> Self {
        self.messages_url = url.to_string();
        self
    }

    fn form_params(&self, to: &str, subject: &str, html: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", self.from.clone()),
            ("to", to.to_string()),
            ("subject", subject.to_string()),
            ("html", html.to_string()),
        ];
        if !self.cc.is_empty() {
            params.push(("cc", self.cc.join(",")));
        }
        params
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let params = self.form_params(to, subject, html);
        let resp = self
            .http
            .post(&self.messages_url)
            .basic_auth("api", Some(&self.api_key))
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }
        log::debug!("notification email sent to {to}");
        Ok(())
    }
}
