//! Delivery channels for one-time passwords.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The medium through which a code is transmitted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    WhatsApp,
    Telegram,
}

impl Channel {
    /// All channels, in declaration order.
    pub const ALL: [Channel; 4] = [
        Channel::Email,
        Channel::Sms,
        Channel::WhatsApp,
        Channel::Telegram,
    ];

    /// Lowercase wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::WhatsApp => "whatsapp",
            Channel::Telegram => "telegram",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = crate::error::OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "sms" => Ok(Channel::Sms),
            "whatsapp" => Ok(Channel::WhatsApp),
            "telegram" => Ok(Channel::Telegram),
            other => Err(crate::error::OtpError::invalid_request(format!(
                "unsupported channel: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for channel in Channel::ALL {
            let json = serde_json::to_string(&channel).unwrap();
            assert_eq!(json, format!("\"{}\"", channel.as_str()));
            let back: Channel = serde_json::from_str(&json).unwrap();
            assert_eq!(back, channel);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("Email".parse::<Channel>().unwrap(), Channel::Email);
        assert_eq!("WHATSAPP".parse::<Channel>().unwrap(), Channel::WhatsApp);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "carrier-pigeon".parse::<Channel>().unwrap_err();
        assert!(err.to_string().contains("unsupported channel"));
    }
}
