use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the healthcare dashboard.
#[derive(Error, Debug)]
pub enum DashError {
    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV document is structurally malformed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the dashboard depends on is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashError::FileRead {
            path: PathBuf::from("asset/healthcare.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("asset/healthcare.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DashError::MissingColumn("Billing Amount".to_string());
        assert_eq!(err.to_string(), "Missing required column: Billing Amount");
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashError::Config("ceiling out of range".to_string());
        assert_eq!(err.to_string(), "Configuration error: ceiling out of range");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_error_from_csv() {
        // Unequal record lengths are rejected by a non-flexible reader.
        let data = "a,b\n1,2,3\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let csv_err = rdr
            .records()
            .find_map(|r| r.err())
            .expect("ragged row must fail");
        let err: DashError = csv_err.into();
        assert!(err.to_string().starts_with("Failed to parse CSV"));
    }
}
