use std::process::{Command, ExitStatus, Output};

use crate::errors::ReportError;

pub trait OutputFormatter {
    fn line(&mut self, line: &str) -> Result<(), ReportError>;
    fn err_line(&mut self, line: &str) -> Result<(), ReportError>;
}

/// Keeps nothing, for commands whose output only matters on failure.
#[derive(Debug, Clone, Default)]
pub struct DiscardFormatter;

impl OutputFormatter for DiscardFormatter {
    fn line(&mut self, _line: &str) -> Result<(), ReportError> {
        Ok(())
    }

    fn err_line(&mut self, _line: &str) -> Result<(), ReportError> {
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CaptureOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl CaptureOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// stdout followed by stderr, the way the report transcript shows them.
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len());
        combined.push_str(&self.stdout);
        if !combined.is_empty() && !combined.ends_with('\n') && !self.stderr.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

/// Drops terminal escape sequences. Tabs are kept: `strip_ansi_escapes`
/// treats them as control bytes, and `go test` separates columns with them.
pub fn strip_ansi(bytes: &[u8]) -> Result<String, ReportError> {
    let stripped = bytes
        .split(|byte| *byte == b'\t')
        .map(|segment| strip_ansi_escapes::strip(segment))
        .collect::<Vec<Vec<u8>>>()
        .join(&b'\t');
    String::from_utf8(stripped).map_err(ReportError::from)
}

/// Runs `cmd` to completion and feeds every stdout line, then every stderr
/// line, to `formatter`. Blocks without a timeout.
pub fn run_and_capture<F>(
    mut cmd: Command,
    formatter: &mut F,
) -> Result<CaptureOutput, ReportError>
where
    F: OutputFormatter,
{
    tracing::debug!(command = ?cmd, "spawning");
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output()?;

    let stdout = strip_ansi(&stdout)?;
    let stderr = strip_ansi(&stderr)?;

    for line in stdout.lines() {
        formatter.line(line)?;
    }
    for line in stderr.lines() {
        formatter.err_line(line)?;
    }

    Ok(CaptureOutput {
        stdout,
        stderr,
        status,
    })
}
