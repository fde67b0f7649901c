use std::path::PathBuf;

use crate::errors::ReportError;

pub mod console;
pub mod smtp;

pub use console::ConsoleNotifier;
pub use smtp::SmtpNotifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub from: String,
    pub to: Vec<String>,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

pub trait Notifier {
    fn send(&self, message: &Message) -> Result<(), ReportError>;
}
