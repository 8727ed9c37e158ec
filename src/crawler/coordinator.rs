//! Traversal coordinator - main harvest orchestration logic
//!
//! This module contains the loop that walks index pages in order, follows
//! each listing link to its detail page and collects announcements until the
//! target count is reached, the source runs out of listings, or a request
//! fails. In every case the announcements collected so far are returned.

use crate::config::Config;
use crate::crawler::links::collect_links;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::DocumentFetcher;
use crate::extract::Extractor;
use crate::model::Announcement;
use crate::state::TraversalState;
use crate::url::ListingSource;
use crate::{HarvestError, RequestError, Result};
use chrono::{DateTime, Utc};
use scraper::Html;
use std::fmt;
use std::time::Duration;

/// Why a traversal run stopped
#[derive(Debug)]
pub enum Termination {
    /// The target count was reached
    TargetReached,

    /// An index page listed no links
    SourceExhausted { page: u32 },

    /// A request failed on the given index page
    Aborted { page: u32, error: RequestError },
}

impl Termination {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetReached => write!(f, "target reached"),
            Self::SourceExhausted { page } => write!(f, "no listings on page {}", page),
            Self::Aborted { page, error } => write!(f, "aborted on page {}: {}", page, error),
        }
    }
}

/// Outcome of one traversal run
#[derive(Debug)]
pub struct TraversalReport {
    /// Announcements in the order they were extracted
    pub announcements: Vec<Announcement>,

    /// Index pages requested, including a failed one
    pub pages_visited: u32,

    /// Politeness pauses taken between index pages
    pub pauses: u32,

    /// Total time spent in those pauses
    pub waited: Duration,

    pub termination: Termination,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

impl TraversalReport {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Main traversal coordinator structure
pub struct Coordinator {
    source: ListingSource,
    fetcher: DocumentFetcher,
    extractor: Extractor,
    scheduler: Scheduler,
    target_count: usize,
    state: TraversalState,
}

impl Coordinator {
    /// Creates a coordinator from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - A URL did not parse or the client failed to build
    pub fn new(config: &Config) -> Result<Self> {
        let source = ListingSource::from_config(&config.source)?;
        let fetcher = DocumentFetcher::new(&config.http)?;
        let scheduler = Scheduler::from_config(&config.traversal);

        Ok(Self::with_parts(
            source,
            fetcher,
            Extractor::default(),
            scheduler,
            config.traversal.target_count,
        ))
    }

    /// Assembles a coordinator from already built parts
    pub fn with_parts(
        source: ListingSource,
        fetcher: DocumentFetcher,
        extractor: Extractor,
        scheduler: Scheduler,
        target_count: usize,
    ) -> Self {
        Self {
            source,
            fetcher,
            extractor,
            scheduler,
            target_count,
            state: TraversalState::FetchingIndex,
        }
    }

    /// Current traversal state
    pub fn state(&self) -> TraversalState {
        self.state
    }

    /// Runs the traversal loop
    ///
    /// For each index page:
    /// 1. Fetches the page (`FetchingIndex`)
    /// 2. Collects detail links (`CollectingLinks`)
    /// 3. Fetches and extracts detail pages until the target is met (`ExtractingDetail`)
    /// 4. Stops or waits the politeness delay and moves on (`CheckLimit`)
    ///
    /// Request errors end the run but are reported in the returned
    /// [`TraversalReport`] rather than returned as `Err`.
    pub async fn run(&mut self) -> Result<TraversalReport> {
        let started_at = Utc::now();
        let mut announcements: Vec<Announcement> = Vec::new();
        let mut page: u32 = 0;

        if self.target_count == 0 {
            self.state = TraversalState::Done;
            return Ok(TraversalReport {
                announcements,
                pages_visited: 0,
                pauses: 0,
                waited: Duration::ZERO,
                termination: Termination::TargetReached,
                started_at,
                finished_at: Utc::now(),
            });
        }

        self.state = TraversalState::FetchingIndex;

        let termination = loop {
            page += 1;
            tracing::info!("Start parsing page {}", page);

            let index_url = self.source.index_url(page);
            let html = match self.fetcher.fetch(&index_url).await {
                Ok(html) => html,
                Err(error) => {
                    tracing::error!("Error occurred during request: {}", error);
                    self.transition(TraversalState::Aborted)?;
                    break Termination::Aborted { page, error };
                }
            };

            self.transition(TraversalState::CollectingLinks)?;
            let links = collect_links(&Html::parse_document(&html));
            tracing::debug!("Page {} lists {} links", page, links.len());

            if links.is_empty() {
                tracing::info!("Page {} has no listings, stopping", page);
                self.transition(TraversalState::Done)?;
                break Termination::SourceExhausted { page };
            }

            self.transition(TraversalState::ExtractingDetail)?;
            if let Err(error) = self.harvest_links(&links, &mut announcements).await {
                tracing::error!("Error occurred during request: {}", error);
                self.transition(TraversalState::Aborted)?;
                break Termination::Aborted { page, error };
            }

            self.transition(TraversalState::CheckLimit)?;
            if announcements.len() >= self.target_count {
                self.transition(TraversalState::Done)?;
                break Termination::TargetReached;
            }

            self.scheduler.pause_before_next_page().await;
            self.transition(TraversalState::FetchingIndex)?;
        };

        let report = TraversalReport {
            announcements,
            pages_visited: page,
            pauses: self.scheduler.pauses(),
            waited: self.scheduler.total_waited(),
            termination,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Traversal finished: {} announcements from {} pages ({})",
            report.announcements.len(),
            report.pages_visited,
            report.termination
        );

        Ok(report)
    }

    /// Fetches and extracts the detail pages behind `links`
    ///
    /// Stops early once the target is met. Unresolvable hrefs are skipped.
    async fn harvest_links(
        &self,
        links: &[String],
        announcements: &mut Vec<Announcement>,
    ) -> std::result::Result<(), RequestError> {
        for href in links {
            if announcements.len() >= self.target_count {
                break;
            }

            let Some(detail_url) = self.source.resolve_detail(href) else {
                tracing::warn!("Skipping unresolvable listing link: {:?}", href);
                continue;
            };

            let html = self.fetcher.fetch(&detail_url).await?;
            let announcement = self
                .extractor
                .extract(&Html::parse_document(&html), detail_url.as_str());
            announcements.push(announcement);

            tracing::info!("{}/{} parsed", announcements.len(), self.target_count);
        }

        Ok(())
    }

    /// Moves to `next`, rejecting transitions the state machine does not allow
    fn transition(&mut self, next: TraversalState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::trace!("Traversal state: {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

/// Runs one traversal with the given configuration
///
/// # Example
///
/// ```no_run
/// use rental_harvest::config::Config;
/// use rental_harvest::crawler::run_traversal;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_traversal(&Config::default()).await?;
/// println!("{} announcements", report.announcements.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_traversal(config: &Config) -> Result<TraversalReport> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
