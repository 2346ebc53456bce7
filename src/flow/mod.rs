//! The OTP lifecycle controller.
//!
//! This module emits tracing events for security monitoring:
//! - `otp.issued` - Code generated, persisted, and handed to dispatch
//! - `otp.send_failed` - Record created but delivery failed
//! - `otp.verified` - Verification passed every check and consumed the record
//! - `otp.verify_failed` - Verification rejected (reason field says why)
//!
//! Recipients appear in events only as digests; plaintext codes never appear.

mod types;

pub use types::{IssueRequest, IssueResponse, VerifyRequest, VerifyResponse};

use crate::channel::Channel;
use crate::codegen::generate_code;
use crate::config::OtpConfig;
use crate::dispatch::{Dispatcher, OtpMessage};
use crate::error::{OtpError, Result};
use crate::hashing::{hash, verify_hash};
use crate::record::NewOtpRecord;
use crate::store::{MarkUsed, RecordStore};
use chrono::Utc;

/// Orchestrates issuance and verification over a [`RecordStore`] and a
/// [`Dispatcher`].
///
/// The controller is stateless between calls; everything durable lives in the
/// store, so one flow value can be shared across tasks.
pub struct OtpFlow<S: RecordStore> {
    store: S,
    dispatcher: Dispatcher,
    config: OtpConfig,
}

impl<S: RecordStore> OtpFlow<S> {
    /// Create a new flow with default policy (5-minute expiry, purpose
    /// "authentication").
    pub fn new(store: S, dispatcher: Dispatcher) -> Self {
        Self {
            store,
            dispatcher,
            config: OtpConfig::default(),
        }
    }

    /// Replace the policy configuration.
    pub fn with_config(mut self, config: OtpConfig) -> Self {
        self.config = config;
        self
    }

    /// Issue a code: validate, generate, persist the hashed record, dispatch.
    ///
    /// Delivery failure does not roll back the record and does not fail the
    /// call; the response reports `sent = false` with a message while the
    /// record stays verifiable. A code the recipient may still receive through
    /// a retried or alternate path must not be invalidated by one delivery
    /// hiccup.
    pub async fn issue(&self, req: IssueRequest) -> Result<IssueResponse> {
        let channel = req
            .channel
            .ok_or_else(|| OtpError::invalid_request("channel is required"))?;
        if req.recipient.is_empty() {
            return Err(OtpError::invalid_request("recipient is required"));
        }

        let code = generate_code()?;

        let created_at = Utc::now();
        let expires_at = created_at + self.config.expiry;
        let channel_hash = hash(&req.recipient);

        let otp_id = self
            .store
            .create(NewOtpRecord {
                channel_hash: channel_hash.clone(),
                channel,
                otp_hash: hash(&code),
                expires_at,
                created_at,
                user_id: req.user_id,
                purpose: self.config.purpose.clone(),
            })
            .await?;

        let message = OtpMessage {
            recipient: req.recipient,
            code,
            purpose: self.config.purpose.clone(),
            valid_for: self.config.expiry_text(),
        };
        let send_result = self.dispatcher.dispatch(channel, &message).await;

        let (sent, message) = match send_result {
            Ok(()) => {
                tracing::info!(
                    target: "otp.issued",
                    otp_id = %otp_id,
                    channel = %channel,
                    recipient_hash = %channel_hash,
                    expires_at = %expires_at,
                    "OTP issued and dispatched"
                );
                (true, format!("OTP sent successfully via {}", channel))
            }
            Err(e) => {
                tracing::warn!(
                    target: "otp.send_failed",
                    otp_id = %otp_id,
                    channel = %channel,
                    recipient_hash = %channel_hash,
                    error = %e,
                    "OTP issued but delivery failed; record remains verifiable"
                );
                (false, format!("OTP generated but failed to send: {}", e))
            }
        };

        Ok(IssueResponse {
            otp_id,
            sent,
            verified: false,
            channel,
            expires_at,
            message: Some(message),
        })
    }

    /// Verify a submitted code against its stored record.
    ///
    /// The rejection checks run in a fixed order and the first failure decides
    /// the message: used before expired (a used-and-expired code reports
    /// "already used"), recipient before code (a wrong-recipient attempt never
    /// learns whether the code was right). Store failures after the fetch
    /// degrade to a `verified = false` response so the caller retries instead
    /// of treating the code as burned.
    pub async fn verify(&self, req: VerifyRequest) -> Result<VerifyResponse> {
        if req.otp_id.is_empty() {
            return Err(OtpError::invalid_request("otpId is required"));
        }
        if req.otp_code.is_empty() {
            return Err(OtpError::invalid_request("otpCode is required"));
        }
        if req.recipient.is_empty() {
            return Err(OtpError::invalid_request("recipient is required"));
        }

        let record = match self.store.get(&req.otp_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(
                    target: "otp.verify_failed",
                    otp_id = %req.otp_id,
                    reason = "store_error",
                    error = %e,
                    "Verification could not read the record; caller should retry"
                );
                return Ok(VerifyResponse::rejected(format!(
                    "Failed to retrieve OTP: {}",
                    e
                )));
            }
        };

        let record = match record {
            Some(record) => record,
            None => return Ok(self.reject(&req.otp_id, "not_found", "OTP not found or invalid")),
        };

        if record.used {
            return Ok(self.reject(&req.otp_id, "already_used", "OTP has already been used"));
        }

        if record.is_expired_at(Utc::now()) {
            return Ok(self.reject(&req.otp_id, "expired", "OTP has expired"));
        }

        if hash(&req.recipient) != record.channel_hash {
            return Ok(self.reject(&req.otp_id, "recipient_mismatch", "Recipient does not match"));
        }

        if !verify_hash(&req.otp_code, &record.otp_hash) {
            return Ok(self.reject(&req.otp_id, "code_mismatch", "Invalid OTP code"));
        }

        // All logical checks passed; the store-level check-and-set decides the
        // winner under concurrency.
        match self.store.mark_used_if_unused(&req.otp_id).await {
            Ok(MarkUsed::Marked) => {
                tracing::info!(
                    target: "otp.verified",
                    otp_id = %req.otp_id,
                    channel = %record.channel,
                    "OTP verified and consumed"
                );
                Ok(VerifyResponse::accepted(record.user_id))
            }
            Ok(MarkUsed::AlreadyUsed) => {
                Ok(self.reject(&req.otp_id, "already_used", "OTP has already been used"))
            }
            Err(e) => {
                tracing::error!(
                    target: "otp.verify_failed",
                    otp_id = %req.otp_id,
                    reason = "store_error",
                    error = %e,
                    "Checks passed but the record could not be consumed; caller should retry"
                );
                Ok(VerifyResponse::rejected(format!(
                    "Failed to mark OTP as used: {}",
                    e
                )))
            }
        }
    }

    fn reject(&self, otp_id: &str, reason: &'static str, message: &str) -> VerifyResponse {
        tracing::info!(
            target: "otp.verify_failed",
            otp_id = %otp_id,
            reason = reason,
            "OTP verification rejected"
        );
        VerifyResponse::rejected(message)
    }

    /// The channels this flow can actually deliver on.
    pub fn available_channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| self.dispatcher.supports(*c))
            .collect()
    }
}
