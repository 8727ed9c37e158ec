//! Crawler module for listing traversal
//!
//! This module contains the harvesting logic, including:
//! - HTTP fetching over one shared client
//! - Detail-link collection from index pages
//! - Politeness pacing between index pages
//! - Overall traversal coordination

mod coordinator;
mod fetcher;
mod links;
mod scheduler;

pub use coordinator::{run_traversal, Coordinator, Termination, TraversalReport};
pub use fetcher::{build_http_client, DocumentFetcher};
pub use links::{collect_links, collect_links_from_html, LISTING_LINK_SELECTOR};
pub use scheduler::Scheduler;
