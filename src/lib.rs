pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod notify;
pub mod report;
pub mod runner;
pub mod runtime;
pub mod store;
pub mod utils;

pub use errors::ReportError;
