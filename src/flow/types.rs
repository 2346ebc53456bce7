//! Request and response types for the OTP lifecycle.

use crate::channel::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to issue and deliver a code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    /// Delivery channel. Optional at the edge so a missing channel is rejected
    /// by validation rather than by deserialization.
    #[serde(default)]
    pub channel: Option<Channel>,
    /// Recipient identifier for the channel (email address, phone number).
    #[serde(default)]
    pub recipient: String,
    /// Opaque external user identifier, passed through unvalidated.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl IssueRequest {
    /// Convenience constructor for programmatic callers.
    pub fn new(channel: Channel, recipient: impl Into<String>) -> Self {
        Self {
            channel: Some(channel),
            recipient: recipient.into(),
            user_id: None,
        }
    }

    /// Attach a user identifier.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Response to an issuance request.
///
/// Never carries the plaintext code or any stored digest. `sent == false` with
/// a populated message means the record exists and is verifiable but delivery
/// did not succeed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    /// Opaque identifier of the created record.
    pub otp_id: String,
    /// Whether delivery through the channel succeeded.
    pub sent: bool,
    /// Always false at issuance.
    pub verified: bool,
    /// The channel the code was dispatched through.
    pub channel: Channel,
    /// When the code stops being verifiable.
    pub expires_at: DateTime<Utc>,
    /// Human-readable outcome description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request to verify a submitted code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Identifier returned at issuance.
    #[serde(default)]
    pub otp_id: String,
    /// The code the user submitted.
    #[serde(default)]
    pub otp_code: String,
    /// The recipient identifier the caller claims the code was sent to.
    #[serde(default)]
    pub recipient: String,
}

impl VerifyRequest {
    pub fn new(
        otp_id: impl Into<String>,
        otp_code: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            otp_id: otp_id.into(),
            otp_code: otp_code.into(),
            recipient: recipient.into(),
        }
    }
}

/// Outcome of a verification attempt.
///
/// Rejections are values, not errors: the boolean plus the message text are
/// the whole user-visible distinction between outcomes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub verified: bool,
    pub message: String,
    /// The record's stored user identifier, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl VerifyResponse {
    /// A rejection with the given user-visible message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            verified: false,
            message: message.into(),
            user_id: None,
        }
    }

    /// A successful verification carrying the stored user identifier.
    pub fn accepted(user_id: Option<String>) -> Self {
        Self {
            verified: true,
            message: "OTP verified successfully".to_string(),
            user_id,
        }
    }
}
