//! Rental Harvest: a polite rental-listing harvester
//!
//! This crate walks the paginated rental index of a real-estate site, follows
//! each listing link to its detail page and extracts a normalized
//! [`Announcement`] record from it, tolerating markup that is missing or
//! inconsistent.
//!
//! Fetching runs on tokio, but strictly one request at a time in link order.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Rental Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::TraversalState,
        to: state::TraversalState,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Errors raised while fetching a document
///
/// Any of these ends the current traversal run. They are carried in the run's
/// [`Termination`] rather than returned as a [`HarvestError`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

impl RequestError {
    /// The URL whose request failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Rental Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Termination, TraversalReport};
pub use extract::extract_announcement;
pub use model::{Announcement, CharacteristicValue, ListingType, RentPeriod};
pub use state::TraversalState;
