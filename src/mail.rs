// src/mail.rs
use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

/// SMTP dispatcher for the rendered briefing. Endpoint, credentials and
/// mailboxes come from the process environment; they are deployment
/// configuration, not pipeline logic.
pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailSender {
    pub fn from_env() -> Result<Self> {
        let host = env_var("SMTP_HOST")?;
        let user = env_var("SMTP_USER")?;
        let pass = env_var("SMTP_PASS")?;
        let from = env_var("BRIEFING_EMAIL_FROM")?
            .parse::<Mailbox>()
            .context("invalid BRIEFING_EMAIL_FROM")?;
        let to = env_var("BRIEFING_EMAIL_TO")?
            .parse::<Mailbox>()
            .context("invalid BRIEFING_EMAIL_TO")?;

        let creds = Credentials::new(user, pass);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .context("invalid SMTP_HOST")?
            .credentials(creds)
            .build();

        Ok(Self { mailer, from, to })
    }

    /// Deliver one digest. Transport errors propagate: a silently dropped
    /// briefing is unrecoverable because the seen state moves on.
    pub async fn send(&self, subject: &str, html_body: &str) -> Result<()> {
        let msg = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .context("building briefing email")?;

        self.mailer.send(msg).await.context("sending briefing email")?;
        Ok(())
    }
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} missing from environment"))
}
