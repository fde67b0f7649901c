//! Invocation of the node client under test: `<bin> <subcommand> --flag value`
//! with an optional passphrase line on stdin.

use std::{
    io::{ErrorKind, Write},
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
};

use serde::de::DeserializeOwned;

use crate::{errors::ReportError, utils::process::strip_ansi};

/// Error substrings the client prints for rejected requests.
pub mod oracle {
    pub const INTRINSIC_GAS_TOO_LOW: &str = "intrinsic gas too low";
    pub const BALANCE_NOT_ENOUGH: &str = "balance is not enough";
    pub const INVALID_ADDRESS: &str = "invalid address";
}

#[derive(Debug, Clone)]
pub struct ClientCommand {
    program: PathBuf,
    base_args: Vec<String>,
    subcommand: String,
    flags: Vec<(String, String)>,
    passphrase: Option<String>,
}

impl ClientCommand {
    pub fn new(program: impl Into<PathBuf>, subcommand: &str) -> Self {
        Self {
            program: program.into(),
            base_args: vec![],
            subcommand: subcommand.to_string(),
            flags: vec![],
            passphrase: None,
        }
    }

    /// Arguments placed before the subcommand.
    pub fn base_args(mut self, args: &[&str]) -> Self {
        self.base_args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn flag(mut self, name: &str, value: impl ToString) -> Self {
        self.flags.push((name.to_string(), value.to_string()));
        self
    }

    pub fn passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = Some(passphrase.to_string());
        self
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = self.base_args.clone();
        args.push(self.subcommand.clone());
        for (name, value) in self.flags.iter() {
            args.push(format!("--{}", name));
            args.push(value.clone());
        }
        args
    }

    pub fn run(&self) -> Result<ClientOutput, ReportError> {
        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Some(passphrase) = &self.passphrase {
                // The client may reject its arguments before reading stdin.
                match writeln!(stdin, "{}", passphrase) {
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                        tracing::debug!("client closed stdin before the passphrase");
                    }
                    result => result?,
                }
            }
        }

        let output = child.wait_with_output()?;
        Ok(ClientOutput {
            status: output.status,
            stdout: strip_ansi(&output.stdout)?,
            stderr: strip_ansi(&output.stderr)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ClientOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ClientOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle) || self.stderr.contains(needle)
    }

    /// Ok when the client failed with `needle` somewhere in its output.
    pub fn expect_error(&self, needle: &str) -> Result<(), ReportError> {
        if !self.success() && self.contains(needle) {
            return Ok(());
        }
        Err(ReportError::UserError(format!(
            "expected error '{}' ({}), got stdout: {} stderr: {}",
            needle,
            self.status,
            self.stdout.trim(),
            self.stderr.trim()
        )))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ReportError> {
        Ok(serde_json::from_str(self.stdout.trim())?)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    /// Fake client: echoes its arguments and the passphrase as JSON, rejects
    /// transfers to `0xbad`.
    const FAKE_CLIENT: &str = r#"
if [ "$1" = "transfer" ] && [ "$3" = "0xbad" ]; then
  echo "Error: invalid address" >&2
  exit 1
fi
read -r pass
printf '{"subcommand":"%s","argc":%d,"passphrase":"%s"}\n' "$1" "$#" "$pass"
"#;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Echo {
        subcommand: String,
        argc: usize,
        passphrase: String,
    }

    fn fake_client() -> (TempDir, String) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("client.sh");
        fs::write(&path, FAKE_CLIENT).unwrap();
        let path = path.display().to_string();
        (dir, path)
    }

    #[test]
    fn builds_flag_pairs() {
        let command = ClientCommand::new("client", "transfer")
            .flag("to", "0xabc")
            .flag("amount", 10);
        assert_eq!(command.args(), vec!["transfer", "--to", "0xabc", "--amount", "10"]);
    }

    #[test]
    fn passphrase_goes_to_stdin() {
        let (_dir, script) = fake_client();
        let output = ClientCommand::new("sh", "sendtx")
            .base_args(&[script.as_str()])
            .flag("from", "0xabc")
            .passphrase("secret")
            .run()
            .unwrap();
        assert!(output.success());
        assert_eq!(
            output.json::<Echo>().unwrap(),
            Echo {
                subcommand: "sendtx".to_string(),
                argc: 3,
                passphrase: "secret".to_string(),
            }
        );
    }

    #[test]
    fn rejected_request_matches_oracle() {
        let (_dir, script) = fake_client();
        let output = ClientCommand::new("sh", "transfer")
            .base_args(&[script.as_str()])
            .flag("to", "0xbad")
            .run()
            .unwrap();
        assert!(!output.success());
        assert!(output.expect_error(oracle::INVALID_ADDRESS).is_ok());
        assert!(output.expect_error(oracle::BALANCE_NOT_ENOUGH).is_err());
    }

    #[test]
    fn early_exit_keeps_client_output() {
        let (_dir, script) = fake_client();
        let passphrase = "x".repeat(1 << 20);
        let output = ClientCommand::new("sh", "transfer")
            .base_args(&[script.as_str()])
            .flag("to", "0xbad")
            .passphrase(&passphrase)
            .run()
            .unwrap();
        assert!(!output.success());
        assert!(output.expect_error(oracle::INVALID_ADDRESS).is_ok());
    }

    #[test]
    fn needle_in_successful_output_is_not_an_error() {
        let (_dir, script) = fake_client();
        let output = ClientCommand::new("sh", "sendtx")
            .base_args(&[script.as_str()])
            .passphrase(oracle::INVALID_ADDRESS)
            .run()
            .unwrap();
        assert!(output.success());
        assert!(output.contains(oracle::INVALID_ADDRESS));
        assert!(output.expect_error(oracle::INVALID_ADDRESS).is_err());
    }
}
