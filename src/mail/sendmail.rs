use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use crate::{config::SmtpConfig, Error, Result};

/// Best-effort delivery of a plaintext message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// `true` when the relay accepted the message. Failures are logged, never raised.
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool;
}

#[derive(Clone, Debug)]
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, to: &str, subject: &str, body: &str) -> Result<Message> {
        let from: Mailbox = self.config.from.parse()?;
        let to: Mailbox = to.parse()?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        Ok(email)
    }

    fn build_transport(&self) -> Result<SmtpTransport> {
        let builder = if self.config.tls {
            SmtpTransport::relay(&self.config.host)?
        } else {
            SmtpTransport::builder_dangerous(&self.config.host)
        };

        let builder = builder.port(self.config.port);
        let builder = if self.config.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
        };

        Ok(builder.build())
    }

    async fn try_send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let email = self.build_message(to, subject, body)?;
        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| Error::MailError(format!("send task failed: {e}")))??;

        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        match self.try_send(to, subject, body).await {
            Ok(()) => {
                tracing::info!(to, subject, "Email sent successfully");
                true
            }
            Err(e) => {
                tracing::error!(to, subject, "Failed to send email: {}", e);
                false
            }
        }
    }
}

/// Fills `{{key}}` placeholders in a bundled template in a single pass, so
/// substituted values are never scanned again. Unknown keys are left as they are.
pub fn render_template(template: &str, placeholders: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        let key = &after[..end];
        match placeholders.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => rendered.push_str(value),
            None => rendered.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    rendered.push_str(rest);
    rendered
}
