//! Error types for trade_finder
//!
//! Fetch and comparison failures are reported as [`pocket_common::TradeError`];
//! this type covers configuration and export.

use std::fmt;

/// Unified error type for trade_finder operations
#[derive(Debug)]
pub enum FinderError {
    /// Writing CSV output failed
    Csv(csv::Error),
    /// File I/O error
    Io(std::io::Error),
    /// Export produced unusable output
    Export(String),
    /// Invalid startup configuration
    Config(String),
}

/// Result alias for trade_finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

impl fmt::Display for FinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinderError::Csv(e) => write!(f, "CSV error: {}", e),
            FinderError::Io(e) => write!(f, "I/O error: {}", e),
            FinderError::Export(msg) => write!(f, "Export error: {}", msg),
            FinderError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for FinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FinderError::Csv(e) => Some(e),
            FinderError::Io(e) => Some(e),
            FinderError::Export(_) => None,
            FinderError::Config(_) => None,
        }
    }
}

impl From<csv::Error> for FinderError {
    fn from(err: csv::Error) -> Self {
        FinderError::Csv(err)
    }
}

impl From<std::io::Error> for FinderError {
    fn from(err: std::io::Error) -> Self {
        FinderError::Io(err)
    }
}
