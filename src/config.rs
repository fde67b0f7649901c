use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use home::home_dir;

use crate::errors::ReportError;

const CONFIG_DIR: &str = ".covreport";
const CONFIG_FILE: &str = "config";
const STORE_FILE: &str = "reports.db";

/// Package tokens matched verbatim against test output lines. The trailing
/// tab keeps `common` from matching `common/utils`.
pub const DEFAULT_PACKAGES: &str = "cmd\t,common\t,core\t,crypto\t,rpc\t,wallet\t";

#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub relay: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay: "smtp.example.com".to_string(),
            port: 465,
            username: "coverage@example.com".to_string(),
            password: String::new(),
            from: "coverage@example.com".to_string(),
            to: parse_recipients("qa@example.com"),
            subject: "Client black-box coverage".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub toolchain: String,
    pub workdir: PathBuf,
    pub profile: PathBuf,
    pub html_report: PathBuf,
    pub packages: Vec<String>,
    pub store_path: PathBuf,
    pub mail: MailConfig,
}

impl HarnessConfig {
    pub fn with_store_path(store_path: PathBuf) -> Self {
        Self {
            toolchain: "go".to_string(),
            workdir: PathBuf::from("."),
            profile: PathBuf::from("coverage.out"),
            html_report: PathBuf::from("coverage.html"),
            packages: parse_packages(DEFAULT_PACKAGES),
            store_path,
            mail: MailConfig::default(),
        }
    }

    /// HTML report path as the notifier sees it.
    pub fn html_report_path(&self) -> PathBuf {
        self.workdir.join(&self.html_report)
    }

    pub fn apply(&mut self, values: &HashMap<String, String>) -> Result<(), ReportError> {
        for (key, value) in values {
            match key.as_str() {
                "toolchain" => self.toolchain = value.clone(),
                "workdir" => self.workdir = PathBuf::from(value),
                "profile" => self.profile = PathBuf::from(value),
                "html_report" => self.html_report = PathBuf::from(value),
                "packages" => self.packages = parse_packages(value),
                "store" => self.store_path = PathBuf::from(value),
                "mail.relay" => self.mail.relay = value.clone(),
                "mail.port" => {
                    self.mail.port = value.parse().map_err(|_| {
                        ReportError::ConfigError(format!("invalid mail.port '{}'", value))
                    })?
                }
                "mail.username" => self.mail.username = value.clone(),
                "mail.password" => self.mail.password = value.clone(),
                "mail.from" => self.mail.from = value.clone(),
                "mail.to" => self.mail.to = parse_recipients(value),
                "mail.subject" => self.mail.subject = value.clone(),
                unknown => tracing::warn!("ignoring unknown config key '{}'", unknown),
            }
        }
        Ok(())
    }
}

fn config_home() -> Result<PathBuf, ReportError> {
    let mut location = home_dir()
        .ok_or_else(|| ReportError::ConfigError("could not find home directory".to_string()))?;
    location.push(CONFIG_DIR);
    Ok(location)
}

/// Splits a comma-separated token list, keeping surrounding whitespace.
pub fn parse_packages(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a semicolon-separated address list.
pub fn parse_recipients(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

fn unescape(value: &str) -> String {
    value.replace("\\t", "\t")
}

/// Parse the config file and return a HashMap of key-value pairs
fn parse_config(config_path: &Path) -> Result<HashMap<String, String>, ReportError> {
    let file = File::open(config_path)?;
    let reader = BufReader::new(file);
    let mut config = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(equals_pos) = trimmed.find('=') {
            let key = trimmed[..equals_pos].trim().to_string();
            let value = unescape(trimmed[equals_pos + 1..].trim());

            if !key.is_empty() {
                config.insert(key, value);
            }
        }
    }

    Ok(config)
}

/// Defaults, overridden by `path` when given or by `~/.covreport/config`
/// when it exists.
pub fn load_config(path: Option<&Path>) -> Result<HarnessConfig, ReportError> {
    let home = config_home()?;
    let mut config = HarnessConfig::with_store_path(home.join(STORE_FILE));

    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = home.join(CONFIG_FILE);
            if !default_path.exists() {
                return Ok(config);
            }
            default_path
        }
    };

    tracing::debug!("loading config from {}", config_path.display());
    config.apply(&parse_config(&config_path)?)?;
    Ok(config)
}
