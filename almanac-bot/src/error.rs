//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use almanac::imagery::ImageryError;
use almanac::weather::WeatherError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error (missing tokens, bad cache dir)
    Config(String),
    /// Weather lookup failed
    Weather(WeatherError),
    /// Map assembly failed
    Imagery(ImageryError),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Config(_) = self {
            eprintln!();
            eprintln!("Required environment variables:");
            eprintln!("  OWM_TOKEN       - weather API token");
            eprintln!("  MAPTILER_TOKEN  - base-map tile API token (map command)");
            eprintln!("  GEOCODE_TOKEN   - geocoding API token");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Weather(e) => write!(f, "{}", e),
            CliError::Imagery(e) => write!(f, "{}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Weather(e) => Some(e),
            CliError::Imagery(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<WeatherError> for CliError {
    fn from(e: WeatherError) -> Self {
        CliError::Weather(e)
    }
}

impl From<ImageryError> for CliError {
    fn from(e: ImageryError) -> Self {
        CliError::Imagery(e)
    }
}
