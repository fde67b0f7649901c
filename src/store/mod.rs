use crate::errors::ReportError;

pub mod sqlite;

pub use sqlite::SqliteReportStore;

/// Appended to the `YYYYMMDD` date to form the storage key of a day.
pub const REPORT_KEY_SUFFIX: &str = "_coverage";

pub fn report_key(date: &str) -> String {
    format!("{}{}", date, REPORT_KEY_SUFFIX)
}

pub trait ReportStore {
    /// Writes `blob` for `date`, replacing any earlier record of that day.
    fn save(&self, date: &str, blob: &[u8]) -> Result<(), ReportError>;
    fn get(&self, date: &str) -> Result<Option<Vec<u8>>, ReportError>;
    /// Dates with a record, oldest first.
    fn dates(&self) -> Result<Vec<String>, ReportError>;
}

/// `get` with absence and errors both folded into an empty blob.
pub fn get_or_empty(store: &dyn ReportStore, date: &str) -> Vec<u8> {
    match store.get(date) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            tracing::info!("no report stored for {}", date);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("failed to read report for {}: {}", date, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ReportStore for BrokenStore {
        fn save(&self, _date: &str, _blob: &[u8]) -> Result<(), ReportError> {
            Err(ReportError::RuntimeError("disk full".to_string()))
        }

        fn get(&self, _date: &str) -> Result<Option<Vec<u8>>, ReportError> {
            Err(ReportError::RuntimeError("disk gone".to_string()))
        }

        fn dates(&self) -> Result<Vec<String>, ReportError> {
            Ok(vec![])
        }
    }

    #[test]
    fn key_is_date_and_suffix() {
        assert_eq!(report_key("20261019"), "20261019_coverage");
    }

    #[test]
    fn read_errors_become_empty() {
        assert!(get_or_empty(&BrokenStore, "20261019").is_empty());
    }
}
