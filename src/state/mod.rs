//! State module for tracking traversal progress
//!
//! `TraversalState` is the state machine the coordinator walks through for
//! each index page: fetch, collect links, extract details, check the limit.

mod traversal_state;

pub use traversal_state::TraversalState;
