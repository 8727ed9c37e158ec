//! URL handling module for Rental Harvest
//!
//! This module builds paginated index URLs and resolves the relative detail
//! links found on index pages against the site origin.

use crate::config::SourceConfig;
use url::Url;

/// Parsed form of the configured listing source
#[derive(Debug, Clone)]
pub struct ListingSource {
    base_url: Url,
    origin: Url,
    query: Vec<(String, String)>,
    page_param: String,
}

impl ListingSource {
    /// Parses the configured base URL and origin
    pub fn from_config(config: &SourceConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            origin: Url::parse(&config.origin)?,
            query: config.query.clone(),
            page_param: config.page_param.clone(),
        })
    }

    /// Builds the URL of index page `page` (1-based)
    ///
    /// The fixed query parameters come first, the page number last.
    ///
    /// # Examples
    ///
    /// ```
    /// use rental_harvest::config::SourceConfig;
    /// use rental_harvest::url::ListingSource;
    ///
    /// let source = ListingSource::from_config(&SourceConfig::default()).unwrap();
    /// assert_eq!(
    ///     source.index_url(2).as_str(),
    ///     "https://realtylink.org/en/properties~for-rent?view=Thumbnail&uc=1&page=2"
    /// );
    /// ```
    pub fn index_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(&self.page_param, &page.to_string());
        }
        url
    }

    /// Resolves a detail link href against the site origin
    ///
    /// Returns None if the href is empty, a fragment, or does not resolve to
    /// an http(s) URL.
    pub fn resolve_detail(&self, href: &str) -> Option<Url> {
        resolve_link(href, &self.origin)
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

/// Resolves a link href to an absolute http(s) URL
fn resolve_link(href: &str, origin: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:") {
        return None;
    }

    match origin.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
