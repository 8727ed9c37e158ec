//! Lookup strategies shared by the field table
//!
//! Every function here returns `None` when the markup is missing or does not
//! coerce, never an error.

use crate::model::CharacteristicValue;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

static GROUPED_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+(?:,[0-9]+)*\b").expect("valid regex"));

/// Trimmed text of an element
///
/// A present but blank element yields an empty string.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First element matching a CSS selector
pub fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Trimmed text of the first element matching `selector`
pub fn text_lookup(document: &Html, selector: &str) -> Option<String> {
    select_first(document, selector).map(element_text)
}

/// Attribute value of the first element matching `selector`
pub fn attribute_lookup(document: &Html, selector: &str, attribute: &str) -> Option<String> {
    select_first(document, selector)?
        .value()
        .attr(attribute)
        .map(|value| value.trim().to_string())
}

/// First run of ASCII digits in `text` as an integer
///
/// ```
/// use rental_harvest::extract::first_integer;
///
/// assert_eq!(first_integer("3 chambres"), Some(3));
/// assert_eq!(first_integer("studio"), None);
/// ```
pub fn first_integer(text: &str) -> Option<i64> {
    DIGITS.find(text)?.as_str().parse().ok()
}

/// First digit run allowing comma thousands separators, as an integer
///
/// ```
/// use rental_harvest::extract::grouped_integer;
///
/// assert_eq!(grouped_integer("1,234 sq ft"), Some(1234));
/// ```
pub fn grouped_integer(text: &str) -> Option<i64> {
    GROUPED_DIGITS
        .find(text)?
        .as_str()
        .replace(',', "")
        .parse()
        .ok()
}

/// Value paired with `label` in the characteristic list
///
/// Finds the `div.carac-title` whose text equals `label` and reads the next
/// sibling `div.carac-value`. Integer values are returned as numbers,
/// anything else as trimmed text.
pub fn characteristic_lookup(document: &Html, label: &str) -> Option<CharacteristicValue> {
    let title_selector = Selector::parse("div.carac-title").ok()?;

    let title = document
        .select(&title_selector)
        .find(|element| element.text().collect::<String>().trim() == label)?;

    let value = title
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| {
            sibling.value().name() == "div"
                && sibling.value().classes().any(|class| class == "carac-value")
        })?;

    let text = value.text().collect::<String>();
    Some(CharacteristicValue::parse(&text))
}
