//! Field extraction for listing detail pages
//!
//! Each output field has its own rule in [`FIELD_RULES`]. A rule reads the
//! parsed page and fills exactly one field (two for the rent
//! classification), so markup drift in one place leaves every other field
//! intact. Rules never fail: a missing element or a value that does not
//! coerce leaves the field at its empty value.

mod derive;
mod photos;
mod strategies;

pub use derive::{classify_rent, normalize_floor_area, region_from_address};
pub use photos::{PhotoSource, ScriptArrayPhotos, DEFAULT_PHOTO_VARIABLE};
pub use strategies::{
    attribute_lookup, characteristic_lookup, first_integer, grouped_integer, text_lookup,
};

use crate::model::Announcement;
use scraper::Html;

const REF: &str = "span#ListingDisplayId";
const TITLE: &str = r#"span[data-id="PageTitle"]"#;
const ADDRESS: &str = "h2.pt-1";
const DESCRIPTION: &str = r#"div[itemprop="description"]"#;
const PRICE: &str = r#"meta[itemprop="price"]"#;
const PRICE_DISPLAY: &str = "div.price-container";
const BEDROOMS: &str = "div.col-lg-3.col-sm-6.cac";
const BATHROOMS: &str = "div.col-lg-3.col-sm-6.sdb";
const REALTOR: &str = "h1.broker-info__broker-title";
const PHONE: &str = r#"a[itemprop="telephone"]"#;
const LATITUDE: &str = "span#PropertyLat";
const LONGITUDE: &str = "span#PropertyLng";

const FLOOR_AREA_LABEL: &str = "Floor Area";
const PARKING_LABEL: &str = "Parking Spaces";
const FEATURES_LABEL: &str = "Additional Features";

/// A parsed detail page plus the photo parser to use on it
pub struct ListingPage<'a> {
    pub document: &'a Html,
    pub photos: &'a dyn PhotoSource,
}

/// One entry of the field table
pub struct FieldRule {
    /// Output field name
    pub name: &'static str,

    /// Fills the field; returns false when nothing was found
    pub apply: fn(&ListingPage<'_>, &mut Announcement) -> bool,
}

/// The field table, applied in order to every detail page
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule { name: "ref", apply: ref_rule },
    FieldRule { name: "rent_period", apply: rent_period_rule },
    FieldRule { name: "type", apply: listing_type_rule },
    FieldRule { name: "title", apply: title_rule },
    FieldRule { name: "address", apply: address_rule },
    FieldRule { name: "region", apply: region_rule },
    FieldRule { name: "description", apply: description_rule },
    FieldRule { name: "images", apply: images_rule },
    FieldRule { name: "price", apply: price_rule },
    FieldRule { name: "bedrooms", apply: bedrooms_rule },
    FieldRule { name: "bathrooms", apply: bathrooms_rule },
    FieldRule { name: "floor_area", apply: floor_area_rule },
    FieldRule { name: "parking_spaces", apply: parking_spaces_rule },
    FieldRule { name: "additional_features", apply: additional_features_rule },
    FieldRule { name: "realtor", apply: realtor_rule },
    FieldRule { name: "phone", apply: phone_rule },
    FieldRule { name: "latitude", apply: latitude_rule },
    FieldRule { name: "longitude", apply: longitude_rule },
];

/// Builds announcements from detail pages
pub struct Extractor {
    photos: Box<dyn PhotoSource>,
}

impl Extractor {
    /// Creates an extractor with a custom photo parser
    pub fn new(photos: Box<dyn PhotoSource>) -> Self {
        Self { photos }
    }

    /// Extracts an announcement from a parsed detail page
    ///
    /// `link` is recorded as given; it is not read from the page.
    pub fn extract(&self, document: &Html, link: &str) -> Announcement {
        let page = ListingPage {
            document,
            photos: self.photos.as_ref(),
        };

        let mut announcement = Announcement::empty(link);
        let mut missing = Vec::new();

        for rule in FIELD_RULES {
            if !(rule.apply)(&page, &mut announcement) {
                missing.push(rule.name);
            }
        }

        if !missing.is_empty() {
            tracing::trace!("{}: no value for {}", link, missing.join(", "));
        }

        announcement
    }

    /// Parses `html` and extracts an announcement from it
    pub fn extract_html(&self, html: &str, link: &str) -> Announcement {
        self.extract(&Html::parse_document(html), link)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Box::new(ScriptArrayPhotos::default()))
    }
}

/// Extracts an announcement using the default photo parser
///
/// # Example
///
/// ```
/// use rental_harvest::extract_announcement;
/// use scraper::Html;
///
/// let html = r#"<span id="ListingDisplayId">123</span>"#;
/// let announcement = extract_announcement(&Html::parse_document(html), "https://example.com/1");
/// assert_eq!(announcement.reference.as_deref(), Some("123"));
/// assert!(announcement.images.is_empty());
/// ```
pub fn extract_announcement(document: &Html, link: &str) -> Announcement {
    Extractor::default().extract(document, link)
}

fn ref_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.reference = text_lookup(page.document, REF);
    has_text(&a.reference)
}

fn rent_period_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.rent_period = price_display(page).and_then(|text| classify_rent(&text).0);
    a.rent_period.is_some()
}

fn listing_type_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.listing_type = price_display(page).and_then(|text| classify_rent(&text).1);
    a.listing_type.is_some()
}

fn title_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.title = text_lookup(page.document, TITLE);
    has_text(&a.title)
}

fn address_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.address = text_lookup(page.document, ADDRESS);
    has_text(&a.address)
}

// Reads the address itself so the rule does not depend on table order
fn region_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    let address = text_lookup(page.document, ADDRESS);
    a.region = region_from_address(address.as_deref());
    a.region.as_deref().is_some_and(|region| !region.is_empty())
}

fn description_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.description = text_lookup(page.document, DESCRIPTION);
    has_text(&a.description)
}

fn images_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.images = page.photos.photo_urls(page.document);
    !a.images.is_empty()
}

fn price_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.price = attribute_lookup(page.document, PRICE, "content");
    has_text(&a.price)
}

fn bedrooms_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.bedrooms = text_lookup(page.document, BEDROOMS).and_then(|text| first_integer(&text));
    a.bedrooms.is_some()
}

fn bathrooms_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.bathrooms = text_lookup(page.document, BATHROOMS).and_then(|text| first_integer(&text));
    a.bathrooms.is_some()
}

fn floor_area_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.floor_area = characteristic_lookup(page.document, FLOOR_AREA_LABEL)
        .and_then(|raw| normalize_floor_area(&raw));
    a.floor_area.is_some()
}

fn parking_spaces_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.parking_spaces = characteristic_lookup(page.document, PARKING_LABEL);
    a.parking_spaces.is_some()
}

fn additional_features_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.additional_features = characteristic_lookup(page.document, FEATURES_LABEL);
    a.additional_features.is_some()
}

fn realtor_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.realtor = text_lookup(page.document, REALTOR);
    has_text(&a.realtor)
}

fn phone_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.phone = text_lookup(page.document, PHONE);
    has_text(&a.phone)
}

fn latitude_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.latitude = text_lookup(page.document, LATITUDE);
    has_text(&a.latitude)
}

fn longitude_rule(page: &ListingPage<'_>, a: &mut Announcement) -> bool {
    a.longitude = text_lookup(page.document, LONGITUDE);
    has_text(&a.longitude)
}

fn price_display(page: &ListingPage<'_>) -> Option<String> {
    text_lookup(page.document, PRICE_DISPLAY)
}

// Blank text is kept as "" but still reported as missing
fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.is_empty())
}
