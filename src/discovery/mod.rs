//! Cointegrated-pair discovery.
//!
//! Finds the pair to analyze, either across the whole loaded universe
//! (automatic mode) or within a user-selected subset anchored to one
//! symbol (anchored mode).

mod error;
pub mod select;
pub mod stats;

pub use error::DiscoveryError;
pub use select::{
    scan_pairs, select_anchored, select_automatic, CandidatePair, DiscoveryConfig, SelectedPair,
    SelectionSource,
};
