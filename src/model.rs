//! Announcement record produced for every visited listing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing period advertised next to the price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentPeriod {
    Month,
    Week,
}

impl RentPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for RentPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of transaction the listing offers
///
/// Only rentals are recognised; the value is present exactly when a
/// [`RentPeriod`] was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Rent,
}

/// Value of a labelled characteristic
///
/// Integers are kept as numbers, anything else as the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    Integer(i64),
    Text(String),
}

impl CharacteristicValue {
    /// Coerces a raw value, preferring an integer
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Self::Integer(n),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }
}

/// One rental listing
///
/// Built in a single pass by [`crate::extract::extract_announcement`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    /// Fully-qualified detail-page URL
    pub link: String,

    #[serde(rename = "ref")]
    pub reference: Option<String>,

    pub rent_period: Option<RentPeriod>,

    #[serde(rename = "type")]
    pub listing_type: Option<ListingType>,

    pub title: Option<String>,

    /// Raw address text
    pub address: Option<String>,

    /// Last two comma-separated parts of the address
    pub region: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    /// Raw machine-readable price
    pub price: Option<String>,

    pub bedrooms: Option<i64>,

    pub bathrooms: Option<i64>,

    pub floor_area: Option<i64>,

    pub parking_spaces: Option<CharacteristicValue>,

    pub additional_features: Option<CharacteristicValue>,

    pub realtor: Option<String>,

    pub phone: Option<String>,

    pub latitude: Option<String>,

    pub longitude: Option<String>,
}

impl Announcement {
    /// An announcement with only its link set
    pub fn empty(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            reference: None,
            rent_period: None,
            listing_type: None,
            title: None,
            address: None,
            region: None,
            description: None,
            images: Vec::new(),
            price: None,
            bedrooms: None,
            bathrooms: None,
            floor_area: None,
            parking_spaces: None,
            additional_features: None,
            realtor: None,
            phone: None,
            latitude: None,
            longitude: None,
        }
    }
}
