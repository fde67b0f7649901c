use std::{fs, path::Path};

use lettre::{
    Message as Email, SmtpTransport, Transport,
    message::{Attachment, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::{Message, Notifier};
use crate::{config::MailConfig, errors::ReportError};

/// Sends over an authenticated TLS relay. Blocks until the relay answers.
pub struct SmtpNotifier {
    relay: String,
    port: u16,
    username: String,
    password: String,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            relay: config.relay.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

fn attachment(path: &Path) -> Result<SinglePart, ReportError> {
    let content = fs::read(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "attachment".to_string());
    let content_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") | Some("htm") => ContentType::TEXT_HTML,
        _ => ContentType::parse("application/octet-stream")
            .map_err(|e| ReportError::MailError(e.to_string()))?,
    };
    Ok(Attachment::new(filename).body(content, content_type))
}

pub fn build_email(message: &Message) -> Result<Email, ReportError> {
    let mut builder = Email::builder()
        .from(message.from.parse()?)
        .subject(message.subject.as_str());
    for recipient in message.to.iter() {
        builder = builder.to(recipient.parse()?);
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::plain(message.body.clone()));
    for path in message.attachments.iter() {
        body = body.singlepart(attachment(path)?);
    }
    Ok(builder.multipart(body)?)
}

impl Notifier for SmtpNotifier {
    fn send(&self, message: &Message) -> Result<(), ReportError> {
        let email = build_email(message)?;
        let mailer = SmtpTransport::relay(&self.relay)?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .build();
        mailer.send(&email)?;
        tracing::info!("report mailed to {}", message.to.join(";"));
        Ok(())
    }
}
