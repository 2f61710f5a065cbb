//! Prompt history port trait.

use crate::domain::error::OllieError;
use crate::domain::history::PromptRecord;

pub trait HistoryPort {
    fn append(&self, record: &PromptRecord) -> Result<(), OllieError>;

    /// Most recent first, at most `limit` records.
    fn recent(&self, limit: usize) -> Result<Vec<PromptRecord>, OllieError>;

    fn clear(&self) -> Result<(), OllieError>;
}
