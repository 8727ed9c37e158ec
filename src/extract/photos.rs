//! Photo URLs embedded in inline scripts
//!
//! Detail pages do not list their gallery in markup; a script assigns a JSON
//! array of URLs to a global variable instead. This is the only field read
//! from script content, so it sits behind its own trait and can be replaced
//! if the page changes how it embeds the gallery.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Global variable the listing pages assign their photo array to
pub const DEFAULT_PHOTO_VARIABLE: &str = "window.MosaicPhotoUrls";

static MOSAIC_PHOTO_URLS: LazyLock<Regex> = LazyLock::new(|| {
    assignment_pattern(DEFAULT_PHOTO_VARIABLE).expect("valid regex")
});

/// Source of a listing's photo URLs
pub trait PhotoSource: Send + Sync {
    /// Photo URLs in page order; empty when none are found
    fn photo_urls(&self, document: &Html) -> Vec<String>;
}

/// Reads `<variable> = [...];` out of the first matching `<script>`
#[derive(Debug, Clone)]
pub struct ScriptArrayPhotos {
    pattern: Regex,
}

impl ScriptArrayPhotos {
    /// Matches assignments to `variable` (e.g. `window.GalleryUrls`)
    pub fn new(variable: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: assignment_pattern(variable)?,
        })
    }

    /// Extracts the photo array from raw script text
    pub fn parse_script(&self, script: &str) -> Option<Vec<String>> {
        let captures = self.pattern.captures(script)?;
        let literal = captures.get(1)?.as_str();

        match serde_json::from_str::<Vec<String>>(literal) {
            Ok(urls) => Some(urls),
            Err(e) => {
                tracing::debug!("Photo array is not a JSON list of strings: {}", e);
                None
            }
        }
    }
}

impl Default for ScriptArrayPhotos {
    fn default() -> Self {
        Self {
            pattern: MOSAIC_PHOTO_URLS.clone(),
        }
    }
}

impl PhotoSource for ScriptArrayPhotos {
    fn photo_urls(&self, document: &Html) -> Vec<String> {
        let Ok(script_selector) = Selector::parse("script") else {
            return Vec::new();
        };

        document
            .select(&script_selector)
            .map(|script| script.text().collect::<String>())
            .find(|text| self.pattern.is_match(text))
            .and_then(|text| self.parse_script(&text))
            .unwrap_or_default()
    }
}

/// `<variable>\s*=\s*(\[...\]);`, matched across lines
fn assignment_pattern(variable: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?s){}\s*=\s*(\[.*?\]);", regex::escape(variable)))
}
