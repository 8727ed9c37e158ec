/// Traversal state definitions
///
/// This module defines the states a traversal run moves through and which
/// moves between them are legal.
use std::fmt;

/// Represents the current state of a traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalState {
    // ===== Active States =====
    /// Requesting the next index page
    FetchingIndex,

    /// Reading detail links off a fetched index page
    CollectingLinks,

    /// Fetching and extracting one detail page
    ExtractingDetail,

    /// Deciding whether another index page is needed
    CheckLimit,

    // ===== Terminal States =====
    /// Target reached or source exhausted
    Done,

    /// A request failed; collected announcements are kept
    Aborted,
}

impl TraversalState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if moving from `self` to `next` is legal
    ///
    /// `CollectingLinks -> Done` covers an index page with no links, and
    /// `ExtractingDetail -> Aborted` a failed detail request.
    pub fn can_transition_to(&self, next: TraversalState) -> bool {
        use TraversalState::*;

        matches!(
            (*self, next),
            (FetchingIndex, CollectingLinks)
                | (FetchingIndex, Aborted)
                | (CollectingLinks, ExtractingDetail)
                | (CollectingLinks, Done)
                | (ExtractingDetail, ExtractingDetail)
                | (ExtractingDetail, CheckLimit)
                | (ExtractingDetail, Aborted)
                | (CheckLimit, FetchingIndex)
                | (CheckLimit, Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchingIndex => "fetching_index",
            Self::CollectingLinks => "collecting_links",
            Self::ExtractingDetail => "extracting_detail",
            Self::CheckLimit => "check_limit",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }

    /// Returns all possible traversal states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::FetchingIndex,
            Self::CollectingLinks,
            Self::ExtractingDetail,
            Self::CheckLimit,
            Self::Done,
            Self::Aborted,
        ]
    }
}

impl fmt::Display for TraversalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
