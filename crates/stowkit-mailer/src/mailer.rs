//! Email sending via SMTP.

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use stowkit_core::Config;

use crate::error::MailError;

/// An email ready to send
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub text_body: String,
    /// When present the email goes out as multipart/alternative
    pub html_body: Option<String>,
}

/// SMTP mailer.
/// Absent entirely (construction yields `None`) when the mailer is
/// disabled or SMTP is not configured.
#[derive(Clone)]
pub struct Mailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// Create a mailer from config. Returns `None` if disabled or SMTP not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.mailer_enabled {
            tracing::debug!("Mailer disabled (MAILER_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host.as_deref()?;
        let from = config.smtp_from.clone()?;
        let port = config.smtp_port_or_default();

        let transport = if config.smtp_tls {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Mailer initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Mailer initialized (SMTP)");
            b.build()
        };

        Some(Self {
            transport: Arc::new(transport),
            from,
        })
    }

    /// Send an email to its recipients.
    ///
    /// Every recipient address must parse; one bad address fails the whole
    /// send before anything reaches the transport.
    pub async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let OutgoingEmail {
            to,
            subject,
            text_body,
            html_body,
        } = email;

        if to.is_empty() {
            return Err(MailError::NoRecipients);
        }

        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.from.clone()))?;

        let mut builder = Message::builder().from(from_addr).subject(subject);
        for addr in &to {
            let mailbox: Mailbox = addr
                .parse()
                .map_err(|_| MailError::InvalidAddress(addr.clone()))?;
            builder = builder.to(mailbox);
        }

        let message = match html_body {
            Some(html) => {
                builder.multipart(MultiPart::alternative_plain_html(text_body, html))?
            }
            None => builder.header(ContentType::TEXT_PLAIN).body(text_body)?,
        };

        self.transport.send(message).await?;

        tracing::info!(recipients = to.len(), "Email sent");
        Ok(())
    }
}
