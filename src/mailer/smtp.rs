//! SMTP mailer using lettre.

use super::{Email, Mailer};
use crate::error::{OtpError, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// SMTP configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (default: 587 for STARTTLS).
    pub port: u16,
    /// Username for authentication.
    pub username: Option<String>,
    /// Password for authentication.
    pub password: Option<String>,
    /// Use STARTTLS (default: true).
    pub starttls: bool,
}

impl SmtpConfig {
    /// Create a new SMTP configuration with the server hostname.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 587,
            username: None,
            password: None,
            starttls: true,
        }
    }

    /// Set the port (default: 587).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set authentication credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Disable STARTTLS (use plain connection or implicit TLS).
    pub fn no_starttls(mut self) -> Self {
        self.starttls = false;
        self
    }

    /// Create config from environment variables.
    ///
    /// Reads from:
    /// - `SMTP_HOST` (required)
    /// - `SMTP_PORT` (optional, default: 587)
    /// - `SMTP_USERNAME` (optional)
    /// - `SMTP_PASSWORD` (optional)
    /// - `SMTP_STARTTLS` (optional, default: true)
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("SMTP_HOST").map_err(|_| {
            OtpError::delivery_failure("SMTP_HOST environment variable not set")
        })?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("SMTP_USERNAME").ok();
        let password = std::env::var("SMTP_PASSWORD").ok();
        let starttls = std::env::var("SMTP_STARTTLS")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            username,
            password,
            starttls,
        })
    }
}

/// SMTP mailer using lettre.
///
/// # Example
///
/// ```rust,ignore
/// use otpflow::mailer::{SmtpMailer, SmtpConfig};
///
/// let config = SmtpConfig::new("smtp.example.com")
///     .port(587)
///     .credentials("user", "app-password");
///
/// let mailer = SmtpMailer::new(config)?;
/// ```
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer with the given configuration.
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host).map_err(|e| {
                OtpError::delivery_failure(format!("Failed to create SMTP transport: {}", e))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host).map_err(|e| {
                OtpError::delivery_failure(format!("Failed to create SMTP transport: {}", e))
            })?
        };

        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let credentials = Credentials::new(username.clone(), password.clone());
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Create a new SMTP mailer from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(SmtpConfig::from_env()?)
    }

    fn build_message(&self, email: &Email) -> Result<Message> {
        let from: Mailbox = match &email.from_name {
            Some(name) => format!("{} <{}>", name, email.from),
            None => email.from.clone(),
        }
        .parse()
        .map_err(|e| OtpError::invalid_request(format!("Invalid 'from' address: {}", e)))?;

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| OtpError::invalid_request(format!("Invalid 'to' address: {}", e)))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone());

        let message = match (&email.text, &email.html) {
            (Some(text), Some(html)) => builder
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_PLAIN)
                                .body(text.clone()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_HTML)
                                .body(html.clone()),
                        ),
                )
                .map_err(|e| {
                    OtpError::delivery_failure(format!("Failed to build email: {}", e))
                })?,
            (Some(text), None) => builder
                .header(ContentType::TEXT_PLAIN)
                .body(text.clone())
                .map_err(|e| {
                    OtpError::delivery_failure(format!("Failed to build email: {}", e))
                })?,
            (None, Some(html)) => builder
                .header(ContentType::TEXT_HTML)
                .body(html.clone())
                .map_err(|e| {
                    OtpError::delivery_failure(format!("Failed to build email: {}", e))
                })?,
            (None, None) => {
                return Err(OtpError::invalid_request(
                    "Email must have either text or HTML body",
                ))
            }
        };

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        email.validate()?;

        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| OtpError::delivery_failure(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn is_healthy(&self) -> bool {
        // A more robust implementation would cache connection state.
        true
    }
}

// AsyncSmtpTransport doesn't impl Debug
impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .finish()
    }
}
