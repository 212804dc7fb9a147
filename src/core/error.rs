//! Failure conditions of the quote operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// The rate provider could not produce a BRL rate. Carries the captured cause.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
