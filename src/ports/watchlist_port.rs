//! Watchlist port trait.

use crate::domain::error::OllieError;

pub trait WatchlistPort {
    fn load(&self) -> Result<Vec<String>, OllieError>;

    /// Returns `false` when the symbol was already present.
    fn add(&self, symbol: &str) -> Result<bool, OllieError>;
}
