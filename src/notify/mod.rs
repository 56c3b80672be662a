//! Email step
//!
//! Renders the digest body and hands it to the email provider.

mod client;
mod template;

pub use client::{compose, EmailMessage, Notifier, ResendClient};
pub use template::DigestTemplate;
