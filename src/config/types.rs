use serde::Deserialize;

/// Main configuration structure for Rental Harvest
///
/// Every section has defaults, so an empty file (or no file) yields a
/// working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub http: HttpConfig,
    pub traversal: TraversalConfig,
    pub output: OutputConfig,
}

/// Where listings come from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Listing index URL, without the page parameter
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Site origin that relative detail links are resolved against
    pub origin: String,

    /// Fixed query parameters appended to every index URL
    pub query: Vec<(String, String)>,

    /// Name of the page-number query parameter
    #[serde(rename = "page-param")]
    pub page_param: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://realtylink.org/en/properties~for-rent".to_string(),
            origin: "https://realtylink.org".to_string(),
            query: vec![
                ("view".to_string(), "Thumbnail".to_string()),
                ("uc".to_string(), "1".to_string()),
            ],
            page_param: "page".to_string(),
        }
    }
}

/// Fixed request headers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Traversal limits and pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Number of announcements to collect before stopping
    #[serde(rename = "target-count")]
    pub target_count: usize,

    /// Pause after each index page before fetching the next (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            target_count: 60,
            page_delay_ms: 1000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON array written at the end of a run
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Spaces per indentation level
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "announcements.json".to_string(),
            indent: 2,
        }
    }
}
