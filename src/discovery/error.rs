//! Error types for the discovery module

use thiserror::Error;

/// Errors that can occur during pair selection
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Fewer than two usable symbols to pair up
    #[error("Need at least two symbols to form a pair, got {0}")]
    NotEnoughSymbols(usize),

    /// No pair passed the stationarity screen
    #[error("No cointegrated pair found among {candidates} symbols")]
    NoViablePair { candidates: usize },

    /// The anchor symbol is not part of the requested selection
    #[error("Anchor symbol {0} must be part of the selected symbols")]
    AnchorNotSelected(String),

    /// Requested symbols missing from the loaded universe
    #[error("Symbols not found in the universe: {0:?}")]
    UnknownSymbols(Vec<String>),
}
