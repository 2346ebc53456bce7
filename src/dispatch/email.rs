//! The one in-repo channel sender: email.

use super::{ChannelSender, OtpMessage};
use crate::channel::Channel;
use crate::error::Result;
use crate::mailer::{Email, Mailer};
use async_trait::async_trait;
use std::sync::Arc;

/// Sender identity and message shape for OTP emails.
#[derive(Debug, Clone)]
pub struct EmailSenderConfig {
    /// From address on outgoing mail.
    pub from_address: String,
    /// Display name paired with the from address.
    pub from_name: String,
}

impl Default for EmailSenderConfig {
    fn default() -> Self {
        Self {
            from_address: "noreply@example.com".to_string(),
            from_name: "Verification".to_string(),
        }
    }
}

impl EmailSenderConfig {
    pub fn new(from_address: impl Into<String>, from_name: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            from_name: from_name.into(),
        }
    }

    /// Create config from environment variables.
    ///
    /// Reads from:
    /// - `OTP_FROM_ADDRESS` (optional, default: "noreply@example.com")
    /// - `OTP_FROM_NAME` (optional, default: "Verification")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            from_address: std::env::var("OTP_FROM_ADDRESS").unwrap_or(defaults.from_address),
            from_name: std::env::var("OTP_FROM_NAME").unwrap_or(defaults.from_name),
        }
    }
}

/// Delivers codes by email through a [`Mailer`] backend.
pub struct EmailSender {
    mailer: Arc<dyn Mailer>,
    config: EmailSenderConfig,
}

impl EmailSender {
    pub fn new(mailer: Arc<dyn Mailer>, config: EmailSenderConfig) -> Self {
        Self { mailer, config }
    }

    fn build_email(&self, message: &OtpMessage) -> Email {
        let subject = format!("Your verification code for {}", message.purpose);
        let body = format!(
            "Your {} code is: {}\n\nThis code expires in {}. If you did not request it, ignore this message.",
            message.purpose, message.code, message.valid_for
        );

        Email::new(&self.config.from_address, &message.recipient, subject)
            .from_name(&self.config.from_name)
            .text(body)
    }
}

#[async_trait]
impl ChannelSender for EmailSender {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, message: &OtpMessage) -> Result<()> {
        let email = self.build_email(message);
        self.mailer.send(&email).await
    }
}

impl std::fmt::Debug for EmailSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSender")
            .field("from_address", &self.config.from_address)
            .finish()
    }
}
