use std::{fmt::Display, string::FromUtf8Error};

#[derive(Debug)]
pub enum ReportError {
    IoError(std::io::Error),
    StringFromUtf8(FromUtf8Error),
    Json(serde_json::Error),
    Store(rusqlite::Error),
    TimeFormat(time::error::Format),
    ConfigError(String),
    MailError(String),
    UserError(String),
    RuntimeError(String),
}

impl std::error::Error for ReportError {}

impl Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::IoError(io_error) => write!(f, "{}", io_error),
            ReportError::StringFromUtf8(error) => write!(f, "{}", error),
            ReportError::Json(error) => write!(f, "{}", error),
            ReportError::Store(error) => write!(f, "report store: {}", error),
            ReportError::TimeFormat(error) => write!(f, "{}", error),
            ReportError::ConfigError(error) => write!(f, "config: {}", error),
            ReportError::MailError(error) => write!(f, "mail: {}", error),
            ReportError::UserError(error) => write!(f, "{}", error),
            ReportError::RuntimeError(error) => write!(f, "{}", error),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<FromUtf8Error> for ReportError {
    fn from(value: FromUtf8Error) -> Self {
        Self::StringFromUtf8(value)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<rusqlite::Error> for ReportError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(value)
    }
}

impl From<time::error::Format> for ReportError {
    fn from(value: time::error::Format) -> Self {
        Self::TimeFormat(value)
    }
}

impl From<lettre::error::Error> for ReportError {
    fn from(value: lettre::error::Error) -> Self {
        Self::MailError(value.to_string())
    }
}

impl From<lettre::address::AddressError> for ReportError {
    fn from(value: lettre::address::AddressError) -> Self {
        Self::MailError(value.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for ReportError {
    fn from(value: lettre::transport::smtp::Error) -> Self {
        Self::MailError(value.to_string())
    }
}
