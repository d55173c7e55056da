//! Stowkit Mailer Library
//!
//! SMTP email helper wrapping lettre's async transport, plus placeholder
//! templating for simple notification emails.

pub mod error;
pub mod mailer;
pub mod template;

// Re-export commonly used types
pub use error::MailError;
pub use mailer::{Mailer, OutgoingEmail};
pub use template::EmailTemplate;
