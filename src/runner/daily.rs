use time::{Date, OffsetDateTime, Weekday, macros::format_description};

use crate::{
    config::HarnessConfig,
    errors::ReportError,
    notify::{ConsoleNotifier, Message, Notifier, SmtpNotifier},
    report::{RunStatus, compose_body, compose_delta},
    runtime::{CoverageRuntime, GoCoverRuntime},
    store::{ReportStore, SqliteReportStore, get_or_empty},
};

use super::Runner;

#[derive(Debug, PartialEq, Eq)]
pub enum DailyOutcome {
    /// Weekend, nothing ran.
    NotApplicable,
    Ran { status: RunStatus, message: Message },
}

pub fn is_weekday(weekday: Weekday) -> bool {
    !matches!(weekday, Weekday::Saturday | Weekday::Sunday)
}

/// `YYYYMMDD`, the date half of a store key.
pub fn date_key(date: Date) -> Result<String, ReportError> {
    Ok(date.format(format_description!("[year][month][day]"))?)
}

pub struct DailyRun<'a> {
    config: &'a HarnessConfig,
    runtime: &'a dyn CoverageRuntime,
    store: &'a dyn ReportStore,
    notifier: &'a dyn Notifier,
    force: bool,
}

impl<'a> DailyRun<'a> {
    pub fn new(
        config: &'a HarnessConfig,
        runtime: &'a dyn CoverageRuntime,
        store: &'a dyn ReportStore,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            runtime,
            store,
            notifier,
            force: false,
        }
    }

    /// Run on any day of the week.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Coverage run, persist, compare with the prior day, notify. Only the
    /// date formatting can fail; store and mail errors are logged.
    pub fn run_daily(&self, now: OffsetDateTime) -> Result<DailyOutcome, ReportError> {
        if !self.force && !is_weekday(now.weekday()) {
            tracing::info!("{} is not a weekday, skipping coverage run", now.weekday());
            return Ok(DailyOutcome::NotApplicable);
        }

        let today = date_key(now.date())?;
        let previous = match now.date().previous_day() {
            Some(date) => Some(date_key(date)?),
            None => None,
        };

        tracing::info!("starting {} coverage run for {}", self.runtime.name(), today);
        let output = self.runtime.run();

        match output.summary.to_json() {
            Ok(blob) => {
                if let Err(e) = self.store.save(&today, &blob) {
                    tracing::warn!("failed to store report for {}: {}", today, e);
                }
            }
            Err(e) => tracing::warn!("not storing report for {}: {}", today, e),
        }

        let prior = previous
            .as_deref()
            .map(|date| get_or_empty(self.store, date))
            .unwrap_or_default();
        let delta = compose_delta(&prior, &output.summary);

        let status = RunStatus::classify(&output.text);
        let message = self.compose_message(status, &today, &delta, &output.text);

        if let Err(e) = self.notifier.send(&message) {
            tracing::error!("failed to send report: {}", e);
        }

        Ok(DailyOutcome::Ran { status, message })
    }

    fn compose_message(
        &self,
        status: RunStatus,
        today: &str,
        delta: &str,
        text: &str,
    ) -> Message {
        let attachments = match status {
            RunStatus::Passed => vec![self.config.html_report_path()],
            RunStatus::Failed => vec![],
        };
        Message {
            subject: format!("{} {}", self.config.mail.subject, today),
            from: self.config.mail.from.clone(),
            to: self.config.mail.to.clone(),
            body: compose_body(status, today, delta, text),
            attachments,
        }
    }
}

/// `covreport run`.
pub struct DailyCommand {
    config: HarnessConfig,
    store: SqliteReportStore,
    force: bool,
    dry_run: bool,
}

impl DailyCommand {
    pub fn new(
        config: HarnessConfig,
        store: SqliteReportStore,
        force: bool,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            store,
            force,
            dry_run,
        }
    }
}

impl Runner for DailyCommand {
    fn run(&self) -> Result<(), ReportError> {
        let runtime = GoCoverRuntime::new(&self.config);
        let notifier: Box<dyn Notifier> = if self.dry_run {
            Box::new(ConsoleNotifier)
        } else {
            Box::new(SmtpNotifier::new(&self.config.mail))
        };
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

        let outcome = DailyRun::new(&self.config, &runtime, &self.store, notifier.as_ref())
            .force(self.force)
            .run_daily(now)?;
        if let DailyOutcome::Ran { status, .. } = outcome {
            if status.is_failed() {
                tracing::warn!("coverage run finished with failures");
            } else {
                tracing::info!("coverage run finished");
            }
        }
        Ok(())
    }
}
