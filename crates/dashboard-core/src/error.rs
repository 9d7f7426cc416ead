use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The deals file is not valid delimited text.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// An amount cell could not be read as a number after separator
    /// normalisation.
    #[error("Malformed amount on row {row}: {value:?}")]
    MalformedAmount { row: usize, value: String },

    /// A date cell did not match `YYYY-MM-DD HH:MM:SS,ffffff`.
    #[error("Malformed timestamp on row {row}: {value:?}")]
    MalformedTimestamp { row: usize, value: String },

    /// A column needed by a pipeline stage is absent from the input header.
    #[error("Missing required column: {0}")]
    MissingRequiredColumn(String),

    /// A currency code outside the known set, rejected under the strict policy.
    #[error("Unsupported currency on row {row}: {code:?}")]
    UnsupportedCurrency { row: usize, code: String },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/some/Deals.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/Deals.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_malformed_amount() {
        let err = DashboardError::MalformedAmount {
            row: 4,
            value: "12a,00".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed amount on row 4: \"12a,00\"");
    }

    #[test]
    fn test_error_display_malformed_timestamp() {
        let err = DashboardError::MalformedTimestamp {
            row: 2,
            value: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed timestamp on row 2: \"yesterday\"");
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DashboardError::MissingRequiredColumn("STAGE_NAME".to_string());
        assert_eq!(err.to_string(), "Missing required column: STAGE_NAME");
    }

    #[test]
    fn test_error_display_unsupported_currency() {
        let err = DashboardError::UnsupportedCurrency {
            row: 7,
            code: "EUR".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported currency on row 7: \"EUR\"");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("bad date bound".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad date bound");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
