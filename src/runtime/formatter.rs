use crate::{errors::ReportError, report::PackageCoverageSummary, utils::process::OutputFormatter};

/// First byte of toolchain lines for packages without test files,
/// e.g. `?   	github.com/x/cmd	[no test files]`.
const NO_TEST_FILES_PREFIX: char = '?';

/// Folds `go test -v -cover` output into a transcript and a per-package
/// summary. stdout and stderr lines are treated alike.
#[derive(Clone, Debug, Default)]
pub struct CoverageFormatter {
    packages: Vec<String>,
    output: String,
    summary: PackageCoverageSummary,
}

impl CoverageFormatter {
    pub fn new(packages: &[String]) -> Self {
        Self {
            packages: packages.to_vec(),
            output: String::new(),
            summary: PackageCoverageSummary::new(),
        }
    }

    fn keep(line: &str) -> bool {
        !line.trim().is_empty() && !line.starts_with(NO_TEST_FILES_PREFIX)
    }

    fn record(&mut self, line: &str) {
        if !Self::keep(line) {
            return;
        }
        self.output.push_str(line);
        self.output.push('\n');
        for package in self.packages.iter() {
            if line.contains(package.as_str()) {
                self.summary.insert(package, line);
            }
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn summary(&self) -> &PackageCoverageSummary {
        &self.summary
    }

    pub fn into_parts(self) -> (String, PackageCoverageSummary) {
        (self.output, self.summary)
    }
}

impl OutputFormatter for CoverageFormatter {
    fn line(&mut self, line: &str) -> Result<(), ReportError> {
        self.record(line);
        Ok(())
    }

    fn err_line(&mut self, line: &str) -> Result<(), ReportError> {
        self.record(line);
        Ok(())
    }
}
