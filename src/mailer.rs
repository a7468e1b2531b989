//! Report delivery over authenticated SMTP submission (STARTTLS).
//!
//! Delivery is strictly optional and strictly last: by the time this module
//! runs, the report has already been rendered, so the caller treats every
//! error here as non-fatal and the process still exits cleanly.

use chrono::Local;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{error, info};

use crate::config::{Config, DEFAULT_SMTP_PORT, DEFAULT_SUBJECT_PREFIX};
use crate::error::AuditError;

/// Sends a rendered report. Production wires in [`SmtpSender`]; tests
/// substitute fakes to drive the failure handling without a live session.
pub trait ReportSender {
    fn send(&self, settings: &MailSettings, html_body: String) -> Result<(), AuditError>;
}

/// [`ReportSender`] backed by an authenticated STARTTLS submission session.
pub struct SmtpSender;

impl ReportSender for SmtpSender {
    fn send(&self, settings: &MailSettings, html_body: String) -> Result<(), AuditError> {
        send_report(settings, html_body)
    }
}

/// Attempts delivery and reports the outcome to the operator.
///
/// Every error is caught here and never propagates: by the time delivery
/// runs the report has already been rendered, so the run still succeeds.
/// Returns whether the mail actually went out.
pub fn deliver_report(cfg: &Config, sender: &dyn ReportSender, html_body: String) -> bool {
    match resolve_mail_settings(cfg).and_then(|settings| sender.send(&settings, html_body)) {
        Ok(()) => {
            println!("HTML email sent successfully.");
            true
        }
        Err(e) => {
            error!("Report delivery failed: {}", e);
            eprintln!("Failed to send email: {}", e);
            false
        }
    }
}

/// Fully-resolved mail settings; every field present.
#[derive(Debug)]
pub struct MailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub receiver: String,
    pub username: String,
    pub password: String,
    pub subject_prefix: String,
}

/// Checks the mail section of the config for completeness. Delivery is
/// refused up front rather than failing halfway through an SMTP session.
pub fn resolve_mail_settings(cfg: &Config) -> Result<MailSettings, AuditError> {
    let mail = &cfg.mail;
    let require = |field: &Option<String>, name: &str| {
        field
            .clone()
            .ok_or_else(|| AuditError::MailConfig(format!("mail.{} is not set", name)))
    };

    Ok(MailSettings {
        smtp_host: require(&mail.smtp_host, "smtp_host")?,
        smtp_port: mail.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
        sender: require(&mail.sender, "sender")?,
        receiver: require(&mail.receiver, "receiver")?,
        username: require(&mail.username, "username")?,
        password: require(&mail.password, "password")?,
        subject_prefix: mail
            .subject_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBJECT_PREFIX.to_string()),
    })
}

/// Sends the rendered HTML report to the configured receiver.
pub fn send_report(settings: &MailSettings, html_body: String) -> Result<(), AuditError> {
    let subject = format!(
        "{} - {}",
        settings.subject_prefix,
        Local::now().format("%Y-%m-%d")
    );

    let message = Message::builder()
        .from(settings.sender.parse()?)
        .to(settings.receiver.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html_body)?;

    let mailer = SmtpTransport::starttls_relay(&settings.smtp_host)?
        .port(settings.smtp_port)
        .credentials(Credentials::new(
            settings.username.clone(),
            settings.password.clone(),
        ))
        .build();

    mailer.send(&message)?;
    info!(
        "Audit report delivered to {} via {}",
        settings.receiver, settings.smtp_host
    );
    Ok(())
}
