use crate::errors::ReportError;

pub mod daily;
pub mod history;

pub use daily::{DailyCommand, DailyOutcome, DailyRun};
pub use history::{ListCommand, ShowCommand};

pub trait Runner {
    fn run(&self) -> Result<(), ReportError>;
}
