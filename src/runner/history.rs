use colored::Colorize;

use crate::{
    errors::ReportError,
    report::PackageCoverageSummary,
    store::{ReportStore, SqliteReportStore},
};

use super::Runner;

/// Human-readable form of one stored day, packages sorted.
pub fn render_record(date: &str, blob: Option<&[u8]>) -> Result<String, ReportError> {
    let Some(blob) = blob else {
        return Ok(format!("No report stored for {}\n", date));
    };
    let summary = PackageCoverageSummary::from_json(blob)?;
    let mut rendered = format!("{} ({} packages)\n", date, summary.len());
    for (package, line) in summary.iter() {
        rendered.push_str(&format!("  {:<12} {}\n", package.trim_end(), line));
    }
    Ok(rendered)
}

/// `covreport show <date>`.
pub struct ShowCommand {
    store: SqliteReportStore,
    date: String,
}

impl ShowCommand {
    pub fn new(store: SqliteReportStore, date: String) -> Self {
        Self { store, date }
    }
}

impl Runner for ShowCommand {
    fn run(&self) -> Result<(), ReportError> {
        let blob = self.store.get(&self.date)?;
        let rendered = render_record(&self.date, blob.as_deref())?;
        if blob.is_some() {
            print!("{}", rendered);
        } else {
            print!("{}", rendered.yellow());
        }
        Ok(())
    }
}

/// `covreport list`.
pub struct ListCommand {
    store: SqliteReportStore,
}

impl ListCommand {
    pub fn new(store: SqliteReportStore) -> Self {
        Self { store }
    }
}

impl Runner for ListCommand {
    fn run(&self) -> Result<(), ReportError> {
        let dates = self.store.dates()?;
        if dates.is_empty() {
            println!("{}", "No reports stored yet".yellow());
        }
        for date in dates {
            println!("{}", date.green());
        }
        Ok(())
    }
}
