//! Error handling for everything around the decoder.
//!
//! Decoding itself never fails: a report that cannot be understood comes back
//! as a record with absent fields and passthrough text. These error types cover
//! the surrounding work only, such as loading configuration, reading report
//! files and writing machine-readable output.

use std::path::PathBuf;

/// Result type alias for the decoder crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for configuration, input and output handling
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Input file or directory not found
    #[error("Input not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// No report text was supplied
    #[error("No report text to decode")]
    EmptyInput,

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Unknown report kind name
    #[error("Unknown report kind: {name} (expected metar, taf or datis)")]
    UnknownReportKind { name: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration parse error for a specific file
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create an input not found error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create an unknown report kind error
    pub fn unknown_report_kind(name: impl Into<String>) -> Self {
        Self::UnknownReportKind { name: name.into() }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: PathBuf::from("<unknown>"),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::configuration("slp_split_threshold must be between 1 and 999");
        assert_eq!(
            err.to_string(),
            "Configuration error: slp_split_threshold must be between 1 and 999"
        );

        let err = Error::unknown_report_kind("pirep");
        assert!(err.to_string().contains("pirep"));

        let err = Error::input_not_found("/no/such/file.txt");
        assert_eq!(err.to_string(), "Input not found: /no/such/file.txt");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_toml_error_conversion() {
        let source = toml::from_str::<toml::Value>("this is = = not toml").unwrap_err();
        let err = Error::config_parse("config.toml", source);
        assert!(err.to_string().starts_with("Invalid configuration file 'config.toml'"));
    }
}
