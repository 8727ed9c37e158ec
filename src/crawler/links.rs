//! Link collector for listing index pages
//!
//! Detail links live in anchors inside the thumbnail cards of an index page.
//! Hrefs are returned as written, in document order, duplicates included.

use scraper::{Html, Selector};

/// Anchors inside a listing thumbnail card
pub const LISTING_LINK_SELECTOR: &str =
    "div.property-thumbnail-feature a.property-thumbnail-summary-link[href]";

/// Extracts detail-page hrefs from a parsed index page
///
/// An empty result means the page lists nothing, which the coordinator takes
/// as the end of the source.
///
/// # Example
///
/// ```
/// use rental_harvest::crawler::collect_links;
/// use scraper::Html;
///
/// let html = r#"<div class="property-thumbnail-feature">
///     <a class="property-thumbnail-summary-link" href="/en/condo/1">One</a>
/// </div>"#;
/// let links = collect_links(&Html::parse_document(html));
/// assert_eq!(links, vec!["/en/condo/1".to_string()]);
/// ```
pub fn collect_links(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(LISTING_LINK_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Convenience function that parses the HTML first
pub fn collect_links_from_html(html: &str) -> Vec<String> {
    collect_links(&Html::parse_document(html))
}
