use crate::channel::Channel;

/// The main error type for OTP operations.
///
/// Verification rejections (not found, already used, expired, mismatches) are
/// not errors: they come back as normal [`VerifyResponse`](crate::flow::VerifyResponse)
/// values with `verified == false`. This enum covers the cases where an
/// operation could not be carried out at all.
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    /// The caller omitted or malformed a required field. No state was created.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The secure random source could not supply entropy. Fatal to issuance.
    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// The record store was unreachable or errored.
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// A registered channel sender accepted the message but failed to deliver it.
    #[error("Delivery failed: {0}")]
    DeliveryFailure(String),

    /// No sender is registered for this channel.
    #[error("{0} channel not yet available")]
    ChannelUnavailable(Channel),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl OtpError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn randomness_unavailable(msg: impl Into<String>) -> Self {
        Self::RandomnessUnavailable(msg.into())
    }

    pub fn store_failure(msg: impl Into<String>) -> Self {
        Self::StoreFailure(msg.into())
    }

    pub fn delivery_failure(msg: impl Into<String>) -> Self {
        Self::DeliveryFailure(msg.into())
    }

    /// Whether the failure came from the persistence layer. Callers use this to
    /// distinguish "retry later" from a hard rejection in telemetry.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreFailure(_))
    }
}

/// Result type alias for OTP operations.
pub type Result<T> = std::result::Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let err = OtpError::invalid_request("channel is required");
        assert!(matches!(err, OtpError::InvalidRequest(_)));
        assert_eq!(err.to_string(), "Invalid request: channel is required");
    }

    #[test]
    fn test_channel_unavailable_display() {
        let err = OtpError::ChannelUnavailable(Channel::Sms);
        assert_eq!(err.to_string(), "sms channel not yet available");
    }

    #[test]
    fn test_store_failure_classification() {
        assert!(OtpError::store_failure("down").is_store_failure());
        assert!(!OtpError::delivery_failure("bounced").is_store_failure());
    }

    #[test]
    fn test_anyhow_passthrough() {
        let err: OtpError = anyhow::anyhow!("unexpected").into();
        assert!(matches!(err, OtpError::Anyhow(_)));
    }
}
