//! otpflow - short-lived, single-use one-time passwords
//!
//! Issues 6-digit numeric codes, binds each one to a recipient identifier and
//! delivery channel, persists only digests, and verifies submitted codes with
//! strict single-use and expiry semantics.
//!
//! # Features
//!
//! - **Issuance**: validate, generate over OS entropy, persist hashed, dispatch
//! - **Verification**: ordered rejection chain ending in an atomic consume
//! - **Privacy**: plaintext codes and recipients never reach the store
//! - **Seams**: bring your own [`RecordStore`] and [`ChannelSender`] backends
//! - **Email**: SMTP (lettre) and console mailers behind the [`Mailer`] trait
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use otpflow::{
//!     Channel, ConsoleMailer, Dispatcher, EmailSender, EmailSenderConfig,
//!     InMemoryRecordStore, IssueRequest, OtpFlow, VerifyRequest,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> otpflow::Result<()> {
//!     otpflow::init_tracing();
//!
//!     let dispatcher = Dispatcher::new().register(Arc::new(EmailSender::new(
//!         Arc::new(ConsoleMailer::new()),
//!         EmailSenderConfig::from_env(),
//!     )));
//!     let flow = OtpFlow::new(InMemoryRecordStore::new(), dispatcher);
//!
//!     let issued = flow
//!         .issue(IssueRequest::new(Channel::Email, "user@example.com"))
//!         .await?;
//!
//!     // Later, with the code the user received:
//!     let outcome = flow
//!         .verify(VerifyRequest::new(&issued.otp_id, "483920", "user@example.com"))
//!         .await?;
//!     println!("verified: {}", outcome.verified);
//!     Ok(())
//! }
//! ```

pub mod channel;
mod codegen;
mod config;
pub mod dispatch;
mod error;
pub mod flow;
pub mod hashing;
pub mod mailer;
mod record;
pub mod store;

// Re-exports for public API
pub use channel::Channel;
pub use codegen::generate_code;
pub use config::{OtpConfig, DEFAULT_EXPIRY, DEFAULT_PURPOSE};
pub use dispatch::{ChannelSender, Dispatcher, EmailSender, EmailSenderConfig, OtpMessage};
pub use error::{OtpError, Result};
pub use flow::{IssueRequest, IssueResponse, OtpFlow, VerifyRequest, VerifyResponse};
pub use mailer::{ConsoleMailer, Email, Mailer};
#[cfg(feature = "smtp")]
pub use mailer::{SmtpConfig, SmtpMailer};
pub use record::{NewOtpRecord, OtpRecord};
pub use store::{InMemoryRecordStore, MarkUsed, RecordStore};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, before issuing any codes.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "otpflow=debug")
/// - `OTPFLOW_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("OTPFLOW_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
