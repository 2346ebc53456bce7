//! Policy configuration for the OTP lifecycle.

use std::time::Duration;

/// Fixed default expiry window for issued codes.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(5 * 60);

/// Fixed default purpose tag stored on every record.
pub const DEFAULT_PURPOSE: &str = "authentication";

/// Configuration passed into [`OtpFlow`](crate::flow::OtpFlow) at construction.
///
/// Defaults match the fixed policy this crate shipped with: codes expire five
/// minutes after issuance and records carry the purpose `"authentication"`.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// How long an issued code stays verifiable.
    pub expiry: Duration,
    /// Purpose tag stored on each record and surfaced in delivery messages.
    pub purpose: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry: DEFAULT_EXPIRY,
            purpose: DEFAULT_PURPOSE.to_string(),
        }
    }
}

impl OtpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expiry window.
    pub fn expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Set the purpose tag.
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Create config from environment variables.
    ///
    /// Reads from:
    /// - `OTP_EXPIRY_SECS` (optional, default: 300)
    /// - `OTP_PURPOSE` (optional, default: "authentication")
    pub fn from_env() -> Self {
        let expiry = std::env::var("OTP_EXPIRY_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_EXPIRY);

        let purpose =
            std::env::var("OTP_PURPOSE").unwrap_or_else(|_| DEFAULT_PURPOSE.to_string());

        Self { expiry, purpose }
    }

    /// The expiry window formatted for user-facing messages ("5 minutes").
    pub fn expiry_text(&self) -> String {
        let secs = self.expiry.as_secs();
        if secs % 60 == 0 && secs >= 60 {
            let mins = secs / 60;
            if mins == 1 {
                "1 minute".to_string()
            } else {
                format!("{} minutes", mins)
            }
        } else if secs == 1 {
            "1 second".to_string()
        } else {
            format!("{} seconds", secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.expiry, Duration::from_secs(300));
        assert_eq!(config.purpose, "authentication");
    }

    #[test]
    fn test_builder() {
        let config = OtpConfig::new()
            .expiry(Duration::from_secs(120))
            .purpose("signup");
        assert_eq!(config.expiry, Duration::from_secs(120));
        assert_eq!(config.purpose, "signup");
    }

    #[test]
    fn test_expiry_text() {
        assert_eq!(OtpConfig::default().expiry_text(), "5 minutes");
        assert_eq!(
            OtpConfig::new().expiry(Duration::from_secs(60)).expiry_text(),
            "1 minute"
        );
        assert_eq!(
            OtpConfig::new().expiry(Duration::from_secs(90)).expiry_text(),
            "90 seconds"
        );
    }
}
