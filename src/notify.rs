//! Mail notification of a written report.
//!
//! When enabled, the report file is read back in full and sent as the HTML
//! body of a `multipart/alternative` message through an SMTP relay. The
//! relay is contacted without authentication or TLS; it is expected to be a
//! local MTA.

use crate::config::MailSettings;
use crate::error::{GetUpdateError, Result};
use chrono::{NaiveDateTime, Timelike};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::future::Future;
use std::path::Path;

/// A message ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Full subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Something that can deliver an [`OutgoingMail`].
pub trait Mailer: Send + Sync {
    /// Submit `mail`.
    ///
    /// # Errors
    ///
    /// Returns [`GetUpdateError::Mail`] if the message is invalid, the relay
    /// is unreachable, or the relay rejects the message.
    fn send(&self, mail: &OutgoingMail) -> impl Future<Output = Result<()>> + Send;
}

/// [`Mailer`] that submits to an SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpRelay {
    host: String,
    port: u16,
}

impl SmtpRelay {
    /// Relay at `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Relay described by the `[MAIL]` table.
    pub fn from_settings(settings: &MailSettings) -> Self {
        Self::new(settings.relay_host.clone(), settings.relay_port)
    }
}

impl Mailer for SmtpRelay {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = build_message(mail)?;
        // The transport lives for this submission only.
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.host.as_str())
            .port(self.port)
            .build();

        transport.send(message).await.map_err(|e| {
            GetUpdateError::Mail(format!(
                "relay {}:{} did not accept the message: {e}",
                self.host, self.port
            ))
        })?;

        tracing::info!(to = %mail.to, relay = %self.host, port = self.port, "report mailed");
        Ok(())
    }
}

/// Build the MIME message for `mail`.
///
/// # Errors
///
/// Returns [`GetUpdateError::Mail`] if an address does not parse or the
/// message cannot be assembled.
pub fn build_message(mail: &OutgoingMail) -> Result<Message> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|e| GetUpdateError::Mail(format!("invalid sender {:?}: {e}", mail.from)))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| GetUpdateError::Mail(format!("invalid recipient {:?}: {e}", mail.to)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.as_str())
        .multipart(MultiPart::alternative().singlepart(SinglePart::html(mail.html_body.clone())))
        .map_err(|e| GetUpdateError::Mail(format!("cannot build message: {e}")))
}

/// Subject line: the configured prefix followed by the run timestamp.
///
/// Microseconds are printed only when non-zero.
pub fn mail_subject(prefix: &str, now: &NaiveDateTime) -> String {
    let format = if now.nanosecond() / 1_000 == 0 {
        "%Y-%m-%d %H:%M:%S"
    } else {
        "%Y-%m-%d %H:%M:%S%.6f"
    };
    format!("{prefix}{}", now.format(format))
}

/// Mail the report at `report` if `settings.send_mail` is set.
///
/// Returns whether a message was sent. When mail is disabled the mailer is
/// never touched.
///
/// # Errors
///
/// Returns [`GetUpdateError::Io`] if the report cannot be read back, or the
/// mailer's error. Nothing is retried.
pub async fn notify<M: Mailer>(
    settings: &MailSettings,
    report: &Path,
    now: &NaiveDateTime,
    mailer: &M,
) -> Result<bool> {
    if !settings.send_mail {
        tracing::debug!("mail disabled; skipping notification");
        return Ok(false);
    }

    let html_body = std::fs::read_to_string(report)?;
    let mail = OutgoingMail {
        from: settings.from.clone(),
        to: settings.to.clone(),
        subject: mail_subject(&settings.subject, now),
        html_body,
    };
    mailer.send(&mail).await?;
    Ok(true)
}
