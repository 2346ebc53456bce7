//! Console mailer for development.
//!
//! Prints email metadata to stdout instead of sending. The body carries the
//! one-time code, so it is redacted unless full output is explicitly enabled;
//! stdout is routinely captured by log collectors, and a captured code defeats
//! the point of hashing it at rest. Not for production use.

use super::{Email, Mailer};
use crate::error::Result;
use async_trait::async_trait;

/// A mailer that prints emails to stdout instead of sending them.
#[derive(Debug, Clone)]
pub struct ConsoleMailer {
    prefix: String,
    show_full_content: bool,
}

impl ConsoleMailer {
    /// Create a new console mailer. Body content is redacted by default.
    pub fn new() -> Self {
        Self {
            prefix: "[EMAIL]".to_string(),
            show_full_content: false,
        }
    }

    /// Create a console mailer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            show_full_content: false,
        }
    }

    /// Enable or disable full body output. When enabled, the one-time code is
    /// printed in the clear; only do this in a local development shell.
    pub fn with_full_output(mut self, enabled: bool) -> Self {
        if enabled {
            tracing::warn!(
                "ConsoleMailer: full output enabled - codes will be visible in stdout. \
                 Do not use in production!"
            );
        }
        self.show_full_content = enabled;
        self
    }
}

impl Default for ConsoleMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        email.validate()?;

        println!("{} ════════════════════════════════════════", self.prefix);
        match &email.from_name {
            Some(name) => println!("{} From:    {} <{}>", self.prefix, name, email.from),
            None => println!("{} From:    {}", self.prefix, email.from),
        }
        println!("{} To:      {}", self.prefix, email.to);
        println!("{} Subject: {}", self.prefix, email.subject);
        println!("{} ────────────────────────────────────────", self.prefix);

        if self.show_full_content {
            if let Some(ref text) = email.text {
                println!("{} [TEXT]", self.prefix);
                for line in text.lines() {
                    println!("{} {}", self.prefix, line);
                }
            }
            if let Some(ref html) = email.html {
                println!("{} [HTML]", self.prefix);
                for line in html.lines() {
                    println!("{} {}", self.prefix, line);
                }
            }
        } else {
            if let Some(ref text) = email.text {
                println!("{} [TEXT] {} bytes [REDACTED]", self.prefix, text.len());
            }
            if let Some(ref html) = email.html {
                println!("{} [HTML] {} bytes [REDACTED]", self.prefix, html.len());
            }
        }

        println!("{} ════════════════════════════════════════", self.prefix);

        Ok(())
    }

    fn is_healthy(&self) -> bool {
        true // Console is always available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_mailer_sends_without_error() {
        let mailer = ConsoleMailer::new();
        let email = Email::new("noreply@test.com", "user@test.com", "Your code").text("483920");

        assert!(mailer.send(&email).await.is_ok());
    }

    #[tokio::test]
    async fn test_console_mailer_validates_email() {
        let mailer = ConsoleMailer::new();
        // No body - should fail validation
        let email = Email::new("noreply@test.com", "user@test.com", "Your code");

        assert!(mailer.send(&email).await.is_err());
    }

    #[test]
    fn test_console_mailer_is_healthy() {
        assert!(ConsoleMailer::new().is_healthy());
    }
}
