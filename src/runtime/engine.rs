use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    errors::ReportError,
    utils::process::{CaptureOutput, OutputFormatter, run_and_capture},
};

/// Builds and runs one toolchain command.
pub struct Engine {
    base_command_args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Engine {
    pub fn new(program: &str) -> Self {
        Self {
            base_command_args: vec![program.to_string()],
            current_dir: None,
        }
    }

    pub fn base_args(&mut self, args: &[&str]) -> &mut Self {
        self.base_command_args
            .extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn base_arg(&mut self, arg: &str) -> &mut Self {
        self.base_command_args.push(arg.to_string());
        self
    }

    pub fn current_dir(&mut self, dir: &Path) -> &mut Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Shell-like rendering for logs and failure texts.
    pub fn display(&self) -> String {
        self.base_command_args.join(" ")
    }

    fn construct_command(&self) -> Command {
        let mut command = Command::new(&self.base_command_args[0]);
        if self.base_command_args.len() > 1 {
            command.args(&self.base_command_args[1..]);
        }
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }

    pub fn execute<F: OutputFormatter>(
        &self,
        formatter: &mut F,
    ) -> Result<CaptureOutput, ReportError> {
        tracing::info!("running `{}`", self.display());
        run_and_capture(self.construct_command(), formatter)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::utils::process::DiscardFormatter;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn runs_in_directory() {
        let dir = tempdir().unwrap();
        let mut engine = Engine::new("sh");
        engine
            .base_args(&["-c", "printf 'here'; pwd >&2"])
            .current_dir(dir.path());
        let captured = engine.execute(&mut DiscardFormatter).unwrap();
        assert_eq!(captured.stdout, "here");
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(
            PathBuf::from(captured.stderr.trim()).canonicalize().unwrap(),
            expected
        );
    }

    #[test]
    fn display_joins_args() {
        let mut engine = Engine::new("go");
        engine.base_args(&["test", "./..."]).base_arg("-v");
        assert_eq!(engine.display(), "go test ./... -v");
    }
}
