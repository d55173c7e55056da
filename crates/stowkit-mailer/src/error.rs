//! Mailer error types

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("No recipients provided")]
    NoRecipients,

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to compose email: {0}")]
    Compose(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
