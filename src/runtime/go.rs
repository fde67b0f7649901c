use std::path::PathBuf;

use crate::{config::HarnessConfig, utils::process::DiscardFormatter};

use super::{CoverageOutput, CoverageRuntime, Engine, formatter::CoverageFormatter};

/// `go test ./... -v -coverprofile=<profile>` followed by
/// `go tool cover -html=<profile> -o <html>`.
pub struct GoCoverRuntime {
    toolchain: String,
    workdir: PathBuf,
    profile: PathBuf,
    html_report: PathBuf,
    packages: Vec<String>,
}

impl GoCoverRuntime {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            toolchain: config.toolchain.clone(),
            workdir: config.workdir.clone(),
            profile: config.profile.clone(),
            html_report: config.html_report.clone(),
            packages: config.packages.clone(),
        }
    }

    /// The toolchain setting may carry leading arguments, e.g. `go1.22 -C sub`.
    fn engine(&self) -> Engine {
        let mut parts = self.toolchain.split_whitespace();
        let mut engine = Engine::new(parts.next().unwrap_or("go"));
        for arg in parts {
            engine.base_arg(arg);
        }
        engine.current_dir(&self.workdir);
        engine
    }

    fn test_engine(&self) -> Engine {
        let mut engine = self.engine();
        engine
            .base_args(&["test", "./...", "-v"])
            .base_arg(&format!("-coverprofile={}", self.profile.display()));
        engine
    }

    fn cover_engine(&self) -> Engine {
        let html_report = self.html_report.display().to_string();
        let mut engine = self.engine();
        engine
            .base_args(&["tool", "cover"])
            .base_arg(&format!("-html={}", self.profile.display()))
            .base_arg("-o")
            .base_arg(&html_report);
        engine
    }

    /// Runs the HTML converter, returning the failure reason if any.
    fn render_html(&self) -> Option<String> {
        match self.cover_engine().execute(&mut DiscardFormatter) {
            Err(e) => Some(e.to_string()),
            Ok(captured) if !captured.success() => {
                Some(format!("{}: {}", captured.status, captured.combined().trim_end()))
            }
            Ok(_) => None,
        }
    }
}

impl CoverageRuntime for GoCoverRuntime {
    fn run(&self) -> CoverageOutput {
        let mut formatter = CoverageFormatter::new(&self.packages);
        let captured = match self.test_engine().execute(&mut formatter) {
            Ok(captured) => captured,
            Err(e) => {
                tracing::error!("could not run tests: {}", e);
                return CoverageOutput::failed(format!("test FAIL: {}\n", e));
            }
        };

        if !captured.success() {
            tracing::error!("tests exited with {}", captured.status);
            return CoverageOutput::failed(format!(
                "test FAIL: {}\n{}",
                captured.status,
                captured.combined()
            ));
        }

        let (text, summary) = formatter.into_parts();
        tracing::info!("collected coverage for {} packages", summary.len());

        // A broken HTML step fails the run even though the summary is usable.
        if let Some(reason) = self.render_html() {
            tracing::error!("coverage html failed: {}", reason);
            return CoverageOutput {
                text: format!("tool cover FAIL: {}", reason),
                summary,
            };
        }

        CoverageOutput { text, summary }
    }

    fn name(&self) -> String {
        self.toolchain.clone()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::report::RunStatus;
    use pretty_assertions::assert_eq;
    use std::{fs, path::Path};
    use tempfile::tempdir;

    /// Stand-in for the `go` binary, run through `sh` and driven by the
    /// first argument.
    fn fake_toolchain(dir: &Path, test_body: &str, cover_body: &str) -> String {
        let path = dir.join("fakego.sh");
        let script = format!(
            "if [ \"$1\" = \"test\" ]; then\n{}\nelse\n{}\nfi\n",
            test_body, cover_body
        );
        fs::write(&path, script).unwrap();
        format!("sh {}", path.display())
    }

    fn runtime(dir: &Path, toolchain: String) -> GoCoverRuntime {
        let mut config = HarnessConfig::with_store_path(dir.join("reports.db"));
        config.toolchain = toolchain;
        config.workdir = dir.to_path_buf();
        config.packages = vec!["common\t".to_string(), "core\t".to_string()];
        GoCoverRuntime::new(&config)
    }

    #[test]
    fn successful_run_builds_summary_and_html() {
        let dir = tempdir().unwrap();
        let toolchain = fake_toolchain(
            dir.path(),
            "printf '?   \\tgithub.com/x/cmd\\t[no test files]\\n\\nok  \\tgithub.com/x/common\\t0.2s\\tcoverage: 80.0%% of statements\\n'",
            "echo '<html/>' > \"$5\"",
        );
        let output = runtime(dir.path(), toolchain).run();

        assert_eq!(RunStatus::classify(&output.text), RunStatus::Passed);
        assert_eq!(
            output.text,
            "ok  \tgithub.com/x/common\t0.2s\tcoverage: 80.0% of statements\n"
        );
        assert_eq!(
            output.summary.get("common\t"),
            Some("ok  \tgithub.com/x/common\t0.2s\tcoverage: 80.0% of statements")
        );
        assert!(dir.path().join("coverage.html").exists());
    }

    #[test]
    fn failing_tests_report_raw_output() {
        let dir = tempdir().unwrap();
        let toolchain = fake_toolchain(
            dir.path(),
            "echo '--- FAIL: TestTransfer'; echo 'ok  \tgithub.com/x/core\t1s\tcoverage: 1.0%'; exit 1",
            "exit 0",
        );
        let output = runtime(dir.path(), toolchain).run();

        assert!(output.text.starts_with("test FAIL: "));
        assert!(output.text.contains("--- FAIL: TestTransfer"));
        assert!(output.summary.is_empty());
    }

    #[test]
    fn html_failure_masks_successful_tests() {
        let dir = tempdir().unwrap();
        let toolchain = fake_toolchain(
            dir.path(),
            "echo 'ok  \tgithub.com/x/core\t1s\tcoverage: 1.0% of statements'",
            "echo 'cover: no profile' >&2; exit 1",
        );
        let output = runtime(dir.path(), toolchain).run();

        assert!(output.text.starts_with("tool cover FAIL: "));
        assert!(output.text.contains("cover: no profile"));
        assert_eq!(output.summary.len(), 1);
    }

    #[test]
    fn missing_toolchain_is_a_failure_text() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-go").display().to_string();
        let output = runtime(dir.path(), missing).run();
        assert_eq!(RunStatus::classify(&output.text), RunStatus::Failed);
        assert!(output.summary.is_empty());
    }
}
