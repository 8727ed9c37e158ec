//! Values computed from other extracted text rather than read directly

use crate::extract::strategies::grouped_integer;
use crate::model::{CharacteristicValue, ListingType, RentPeriod};

/// Region: the last two comma-separated parts of an address
///
/// A present address with fewer than two parts yields an empty region; an
/// absent address yields no region.
///
/// ```
/// use rental_harvest::extract::region_from_address;
///
/// assert_eq!(
///     region_from_address(Some("123 Main St, Springfield, IL")),
///     Some("Springfield, IL".to_string())
/// );
/// assert_eq!(region_from_address(Some("123 Main St")), Some(String::new()));
/// assert_eq!(region_from_address(None), None);
/// ```
pub fn region_from_address(address: Option<&str>) -> Option<String> {
    let address = address?;
    let parts: Vec<&str> = address.split(',').collect();

    if parts.len() < 2 {
        return Some(String::new());
    }

    let n = parts.len();
    Some(format!("{}, {}", parts[n - 2].trim(), parts[n - 1].trim()))
}

/// Rent period and listing type from the price display text
///
/// "month" wins over "week" when both appear; neither yields `(None, None)`.
pub fn classify_rent(price_text: &str) -> (Option<RentPeriod>, Option<ListingType>) {
    let lower = price_text.to_lowercase();

    if lower.contains("month") {
        (Some(RentPeriod::Month), Some(ListingType::Rent))
    } else if lower.contains("week") {
        (Some(RentPeriod::Week), Some(ListingType::Rent))
    } else {
        (None, None)
    }
}

/// Floor area in whole units from the raw characteristic value
pub fn normalize_floor_area(raw: &CharacteristicValue) -> Option<i64> {
    match raw {
        CharacteristicValue::Integer(n) => Some(*n),
        CharacteristicValue::Text(text) => grouped_integer(text),
    }
}
