//! Routing of generated codes to channel-specific senders.

mod email;

pub use email::{EmailSender, EmailSenderConfig};

use crate::channel::Channel;
use crate::error::{OtpError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// One outbound code delivery.
#[derive(Debug, Clone)]
pub struct OtpMessage {
    /// Plaintext recipient identifier for the channel (address, phone number).
    pub recipient: String,
    /// The plaintext code. Exists only in flight; the store sees its digest.
    pub code: String,
    /// Purpose tag surfaced in the message ("authentication").
    pub purpose: String,
    /// Human-readable validity window for the message body ("5 minutes").
    pub valid_for: String,
}

/// A channel-specific delivery collaborator.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// The channel this sender delivers on.
    fn channel(&self) -> Channel;

    /// Attempt delivery. A failure here is a genuine
    /// [`OtpError::DeliveryFailure`], distinct from the dispatcher's
    /// unavailable-channel rejection.
    async fn send(&self, message: &OtpMessage) -> Result<()>;
}

/// Routes a message to the sender registered for its channel.
///
/// Only email ships with a sender in-repo; dispatching to any channel without
/// a registered sender fails with [`OtpError::ChannelUnavailable`] so callers
/// can tell "this channel does not exist yet" apart from "delivery bounced".
#[derive(Clone, Default)]
pub struct Dispatcher {
    senders: HashMap<Channel, Arc<dyn ChannelSender>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sender under its own channel. Replaces any prior sender for
    /// that channel.
    pub fn register(mut self, sender: Arc<dyn ChannelSender>) -> Self {
        self.senders.insert(sender.channel(), sender);
        self
    }

    /// Whether a sender is registered for the channel.
    pub fn supports(&self, channel: Channel) -> bool {
        self.senders.contains_key(&channel)
    }

    /// Hand the message to the channel's sender.
    pub async fn dispatch(&self, channel: Channel, message: &OtpMessage) -> Result<()> {
        let sender = self
            .senders
            .get(&channel)
            .ok_or(OtpError::ChannelUnavailable(channel))?;
        sender.send(message).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels: Vec<&str> = self.senders.keys().map(|c| c.as_str()).collect();
        f.debug_struct("Dispatcher").field("channels", &channels).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSender {
        channel: Channel,
        sent: AtomicUsize,
    }

    #[async_trait]
    impl ChannelSender for CountingSender {
        fn channel(&self) -> Channel {
            self.channel
        }

        async fn send(&self, _message: &OtpMessage) -> Result<()> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn message() -> OtpMessage {
        OtpMessage {
            recipient: "user@example.com".to_string(),
            code: "483920".to_string(),
            purpose: "authentication".to_string(),
            valid_for: "5 minutes".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_registered_sender() {
        let sender = Arc::new(CountingSender {
            channel: Channel::Email,
            sent: AtomicUsize::new(0),
        });
        let dispatcher = Dispatcher::new().register(sender.clone());

        dispatcher.dispatch(Channel::Email, &message()).await.unwrap();
        assert_eq!(sender.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_unregistered_channel_is_unavailable() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher
            .dispatch(Channel::Telegram, &message())
            .await
            .unwrap_err();

        assert!(matches!(err, OtpError::ChannelUnavailable(Channel::Telegram)));
        assert!(err.to_string().contains("not yet available"));
    }

    #[test]
    fn test_supports() {
        let dispatcher = Dispatcher::new().register(Arc::new(CountingSender {
            channel: Channel::Email,
            sent: AtomicUsize::new(0),
        }));

        assert!(dispatcher.supports(Channel::Email));
        assert!(!dispatcher.supports(Channel::Sms));
    }
}
