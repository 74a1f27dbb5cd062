use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::SmtpConfig;
use crate::diff::DiffResult;
use crate::error::NotifyError;

/// A composed notification, transport-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub body: String,
}

/// Builds the daily report message: total count, then either a no-changes
/// line or the enumerated additions and removals with status labels. When
/// `snapshot_unsaved` is set, a trailing warning flags that tomorrow's
/// comparison baseline is stale.
pub fn compose(date: NaiveDate, total: usize, diff: &DiffResult, snapshot_unsaved: bool) -> Email {
    let subject = format!("Daily FP Project Name Report - {}", date.format("%Y-%m-%d"));

    let mut body = format!("Total FP projects today: {}\n\n", total);
    if diff.is_empty() {
        body.push_str("No changes in FP project names.\n");
    } else {
        body.push_str("Changes in FP project names:\n");
        for change in diff.added.iter().chain(diff.removed.iter()) {
            body.push_str(&format!("- {} ({})\n", change.name, change.status));
        }
    }

    if snapshot_unsaved {
        body.push_str(
            "\nWarning: today's snapshot could not be written; \
             tomorrow's comparison baseline will be stale.\n",
        );
    }

    Email { subject, body }
}

/// Delivery seam. The production implementation speaks authenticated SMTP;
/// tests substitute a recording fake.
pub trait Mailer {
    fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

/// Sends one plain-text message to the full recipient list over STARTTLS
/// with credential auth.
pub struct SmtpMailer {
    smtp: SmtpConfig,
    recipients: Vec<String>,
}

impl SmtpMailer {
    pub fn new(smtp: SmtpConfig, recipients: Vec<String>) -> Self {
        SmtpMailer { smtp, recipients }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let start = Instant::now();

        let sender: Mailbox = self
            .smtp
            .sender
            .parse()
            .with_context(|| format!("invalid sender address '{}'", self.smtp.sender))?;

        let mut builder = Message::builder()
            .from(sender)
            .subject(email.subject.clone());
        for recipient in &self.recipients {
            let mailbox: Mailbox = recipient
                .parse()
                .with_context(|| format!("invalid recipient address '{}'", recipient))?;
            builder = builder.to(mailbox);
        }
        let message = builder
            .body(email.body.clone())
            .context("failed to build message")?;

        let transport = SmtpTransport::starttls_relay(&self.smtp.server)
            .with_context(|| format!("invalid SMTP server '{}'", self.smtp.server))?
            .port(self.smtp.port)
            .credentials(Credentials::new(
                self.smtp.sender.clone(),
                self.smtp.password.clone(),
            ))
            .build();

        transport
            .send(&message)
            .context("SMTP send failed")?;

        info!(
            action = "complete",
            component = "notify",
            recipient_count = self.recipients.len(),
            duration_ms = start.elapsed().as_millis(),
            "Email sent"
        );
        Ok(())
    }
}
