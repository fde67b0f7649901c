use colored::Colorize;

use super::{Message, Notifier};
use crate::errors::ReportError;

/// Prints the message instead of mailing it, for `run --dry-run`.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, message: &Message) -> Result<(), ReportError> {
        println!("{} {}", "Subject:".bold(), message.subject);
        println!("{} {}", "To:".bold(), message.to.join(";"));
        for path in message.attachments.iter() {
            println!("{} {}", "Attachment:".bold(), path.display().to_string().cyan());
        }
        println!();
        print!("{}", message.body);
        if !message.body.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
