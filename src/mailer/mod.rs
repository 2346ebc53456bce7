//! Mail-sending seam for the email delivery channel.
//!
//! Abstracts the mail backend so the email sender can run against SMTP in
//! production and a console backend in development and tests.

mod console;
#[cfg(feature = "smtp")]
mod smtp;

pub use console::ConsoleMailer;
#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpMailer};

use crate::error::{OtpError, Result};
use async_trait::async_trait;

/// An email message carrying a one-time code.
#[derive(Debug, Clone)]
pub struct Email {
    /// Sender address (e.g., "noreply@example.com").
    pub from: String,
    /// Display name for the sender.
    pub from_name: Option<String>,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body (optional if html is provided).
    pub text: Option<String>,
    /// HTML body (optional if text is provided).
    pub html: Option<String>,
}

impl Email {
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            from_name: None,
            to: to.into(),
            subject: subject.into(),
            text: None,
            html: None,
        }
    }

    /// Set the sender display name.
    pub fn from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    /// Set the plain text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = Some(body.into());
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    /// Validate the email has the fields every backend needs.
    pub fn validate(&self) -> Result<()> {
        if self.from.is_empty() {
            return Err(OtpError::invalid_request("Email 'from' is required"));
        }
        if self.to.is_empty() {
            return Err(OtpError::invalid_request("Email 'to' is required"));
        }
        if self.subject.is_empty() {
            return Err(OtpError::invalid_request("Email 'subject' is required"));
        }
        if self.text.is_none() && self.html.is_none() {
            return Err(OtpError::invalid_request(
                "Email must have either 'text' or 'html' body",
            ));
        }
        Ok(())
    }
}

/// Mail backend contract.
///
/// Backends return [`OtpError::DeliveryFailure`] when the provider rejects or
/// cannot transport the message.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email.
    async fn send(&self, email: &Email) -> Result<()>;

    /// Check if the backend is healthy/connected.
    fn is_healthy(&self) -> bool;
}
