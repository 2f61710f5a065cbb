//! Headline source port trait.

use crate::domain::error::OllieError;
use crate::domain::news::NewsItem;

pub trait NewsPort {
    /// Human-readable source name for diagnostics.
    fn source_name(&self) -> &str;

    fn fetch_headlines(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, OllieError>;
}
