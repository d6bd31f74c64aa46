//! Order confirmation mail.
//!
//! The SMTP transport sits behind the [`Mailer`] trait so tests can swap in
//! a recording implementation. Sending is synchronous within the request
//! path and a transport failure is a hard error, not a silenced one.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::{config::SmtpConfig, money};

pub const ORDER_CONFIRMATION_SUBJECT: &str = "Thank You For Your Order!";

#[derive(Error, Debug)]
#[error("{0}")]
pub struct MailError(String);

impl MailError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = config
            .from
            .parse()
            .map_err(|e| MailError::new(format!("Invalid sender address: {e}")))?;

        let mut builder = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailError::new(format!("SMTP relay setup failed: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let to = to
            .parse()
            .map_err(|e| MailError::new(format!("Invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::new(format!("Failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::new(format!("SMTP send failed: {e}")))?;

        Ok(())
    }
}

/// Plain-text confirmation body; the greeting varies by fulfillment mode.
pub fn order_confirmation_body(is_pickup: bool, price_cents: i64) -> String {
    let greeting = if is_pickup {
        "Thank you for your order! Your food is being made and will be ready for pickup soon!"
    } else {
        "Thank you for your order! Your food is being made and will be delivered soon!"
    };

    format!(
        "{greeting}\nYour total: {}\nThank you again for your order!",
        money::format_cents(price_cents)
    )
}

#[cfg(test)]
mod tests {
    use super::order_confirmation_body;

    #[test]
    fn test_pickup_body() {
        let body = order_confirmation_body(true, 750);

        assert!(body.contains("ready for pickup soon"));
        assert!(body.contains("Your total: 7.50"));
    }

    #[test]
    fn test_delivery_body() {
        let body = order_confirmation_body(false, 500);

        assert!(body.contains("delivered soon"));
        assert!(body.contains("Your total: 5.00"));
    }
}
