//! The durable representation of one issued code.

use crate::channel::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One issued OTP as persisted by a [`RecordStore`](crate::store::RecordStore).
///
/// Only digests of the recipient identifier and the code are stored; the
/// plaintexts never reach the store. `used` is monotonic (false to true,
/// never back), and `verified` flips together with it inside the store's
/// atomic consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    /// Opaque identifier assigned by the store at creation.
    pub id: String,
    /// SHA-256 digest of the recipient identifier (email address, phone number).
    pub channel_hash: String,
    /// Delivery channel the code was dispatched through.
    pub channel: Channel,
    /// SHA-256 digest of the generated code.
    pub otp_hash: String,
    /// True only after a successful verification.
    pub verified: bool,
    /// True once consumed by the first verification that passed every check.
    pub used: bool,
    /// Absolute expiry, fixed at creation.
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional external user identifier, passed through and never validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Purpose tag stored for audit ("authentication").
    pub purpose: String,
}

impl OtpRecord {
    /// Whether the record's expiry has passed at `now`.
    ///
    /// Expiry is evaluated at read time; nothing is written back.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Creation payload handed to [`RecordStore::create`](crate::store::RecordStore::create).
///
/// The store assigns the id and returns it.
#[derive(Debug, Clone)]
pub struct NewOtpRecord {
    pub channel_hash: String,
    pub channel: Channel,
    pub otp_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<String>,
    pub purpose: String,
}

impl NewOtpRecord {
    /// Materialize the record under a store-assigned id. Fresh records start
    /// unused and unverified.
    pub fn into_record(self, id: String) -> OtpRecord {
        OtpRecord {
            id,
            channel_hash: self.channel_hash,
            channel: self.channel,
            otp_hash: self.otp_hash,
            verified: false,
            used: false,
            expires_at: self.expires_at,
            created_at: self.created_at,
            user_id: self.user_id,
            purpose: self.purpose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_record() -> NewOtpRecord {
        let now = Utc::now();
        NewOtpRecord {
            channel_hash: "abc".to_string(),
            channel: Channel::Email,
            otp_hash: "def".to_string(),
            expires_at: now + Duration::minutes(5),
            created_at: now,
            user_id: Some("user-1".to_string()),
            purpose: "authentication".to_string(),
        }
    }

    #[test]
    fn test_fresh_record_starts_unused() {
        let record = new_record().into_record("otp-1".to_string());
        assert!(!record.used);
        assert!(!record.verified);
        assert_eq!(record.id, "otp-1");
    }

    #[test]
    fn test_expiry_evaluated_at_read_time() {
        let record = new_record().into_record("otp-1".to_string());
        assert!(!record.is_expired_at(record.created_at));
        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_serde_wire_names() {
        let record = new_record().into_record("otp-1".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("channelHash").is_some());
        assert!(json.get("otpHash").is_some());
        assert!(json.get("expiresAt").is_some());
        assert_eq!(json["userId"], "user-1");
    }
}
