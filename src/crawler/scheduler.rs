//! Pacing between index pages
//!
//! The source is throttled per index page rather than per request: however
//! many detail pages an index page lists, the coordinator waits a fixed delay
//! before requesting the next index page.

use crate::config::TraversalConfig;
use std::time::{Duration, Instant};

/// Delay policy applied between index pages
#[derive(Debug, Clone)]
pub struct Scheduler {
    page_delay: Duration,
    total_waited: Duration,
    pauses: u32,
}

impl Scheduler {
    /// Creates a scheduler with a fixed delay per index page
    pub fn new(page_delay: Duration) -> Self {
        Self {
            page_delay,
            total_waited: Duration::ZERO,
            pauses: 0,
        }
    }

    /// Creates a scheduler from the traversal configuration
    pub fn from_config(config: &TraversalConfig) -> Self {
        Self::new(Duration::from_millis(config.page_delay_ms))
    }

    /// A scheduler that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// Waits out the politeness delay before the next index page
    pub async fn pause_before_next_page(&mut self) {
        if self.page_delay.is_zero() {
            return;
        }

        tracing::debug!("Waiting {:?} before next index page", self.page_delay);
        let started = Instant::now();
        tokio::time::sleep(self.page_delay).await;

        self.total_waited += started.elapsed();
        self.pauses += 1;
    }

    /// Total time spent in politeness pauses
    pub fn total_waited(&self) -> Duration {
        self.total_waited
    }

    /// Number of pauses taken so far
    pub fn pauses(&self) -> u32 {
        self.pauses
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_config(&TraversalConfig::default())
    }
}
