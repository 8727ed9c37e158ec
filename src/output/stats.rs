//! Run statistics
//!
//! Summarizes a finished traversal for the console: how far it got, why it
//! stopped and how often each field was found.

use crate::crawler::TraversalReport;
use crate::model::Announcement;

/// Fields counted in the fill summary, in output order
const COUNTED_FIELDS: &[&str] = &[
    "ref",
    "rent_period",
    "type",
    "title",
    "address",
    "region",
    "description",
    "images",
    "price",
    "bedrooms",
    "bathrooms",
    "floor_area",
    "parking_spaces",
    "additional_features",
    "realtor",
    "phone",
    "latitude",
    "longitude",
];

/// Traversal statistics summary
#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub announcements: usize,
    pub pages_visited: u32,
    pub duration_seconds: i64,
    pub pauses: u32,
    pub waited_seconds: f64,
    pub termination: String,
    pub aborted: bool,

    /// (field name, announcements with a non-empty value)
    pub field_fill: Vec<(&'static str, usize)>,
}

impl RunStatistics {
    /// Builds statistics from a finished run
    pub fn from_report(report: &TraversalReport) -> Self {
        Self {
            announcements: report.announcements.len(),
            pages_visited: report.pages_visited,
            duration_seconds: report.duration_seconds(),
            pauses: report.pauses,
            waited_seconds: report.waited.as_secs_f64(),
            termination: report.termination.to_string(),
            aborted: report.termination.is_aborted(),
            field_fill: field_fill(&report.announcements),
        }
    }
}

/// Counts, per field, the announcements where it is filled
pub fn field_fill(announcements: &[Announcement]) -> Vec<(&'static str, usize)> {
    COUNTED_FIELDS
        .iter()
        .map(|&field| {
            let count = announcements
                .iter()
                .filter(|a| is_filled(a, field))
                .count();
            (field, count)
        })
        .collect()
}

fn is_filled(a: &Announcement, field: &str) -> bool {
    match field {
        "ref" => has_text(&a.reference),
        "rent_period" => a.rent_period.is_some(),
        "type" => a.listing_type.is_some(),
        "title" => has_text(&a.title),
        "address" => has_text(&a.address),
        "region" => has_text(&a.region),
        "description" => has_text(&a.description),
        "images" => !a.images.is_empty(),
        "price" => has_text(&a.price),
        "bedrooms" => a.bedrooms.is_some(),
        "bathrooms" => a.bathrooms.is_some(),
        "floor_area" => a.floor_area.is_some(),
        "parking_spaces" => a.parking_spaces.is_some(),
        "additional_features" => a.additional_features.is_some(),
        "realtor" => has_text(&a.realtor),
        "phone" => has_text(&a.phone),
        "latitude" => has_text(&a.latitude),
        "longitude" => has_text(&a.longitude),
        _ => false,
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.is_empty())
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Announcements: {}", stats.announcements);
    println!("  Index pages visited: {}", stats.pages_visited);
    println!("  Duration: {}s", stats.duration_seconds);
    println!(
        "  Politeness pauses: {} ({:.1}s)",
        stats.pauses, stats.waited_seconds
    );
    println!("  Stopped: {}", stats.termination);
    println!();

    if stats.aborted {
        println!("Warning: the run ended early on a request error; results are partial.");
        println!();
    }

    if stats.announcements > 0 {
        println!("Field Coverage:");
        for (field, count) in &stats.field_fill {
            let percentage = (*count as f64 / stats.announcements as f64) * 100.0;
            println!("  {:<20} {:>4} ({:.1}%)", field, count, percentage);
        }
        println!();
    }
}
