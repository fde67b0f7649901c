use crate::report::PackageCoverageSummary;

mod engine;
pub mod formatter;
pub mod go;

pub use engine::Engine;
pub use go::GoCoverRuntime;

/// Result of one coverage run. Failures are reported in-band: `text`
/// then carries a `FAIL` marker, see [`crate::report::RunStatus`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageOutput {
    pub text: String,
    pub summary: PackageCoverageSummary,
}

impl CoverageOutput {
    pub fn failed(text: String) -> Self {
        Self {
            text,
            summary: PackageCoverageSummary::new(),
        }
    }
}

pub trait CoverageRuntime {
    fn run(&self) -> CoverageOutput;
    fn name(&self) -> String;
}
