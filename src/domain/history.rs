//! Prompt history records.

use chrono::NaiveDateTime;

pub const HISTORY_DISPLAY_LIMIT: usize = 5;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct PromptRecord {
    pub created_at: NaiveDateTime,
    pub symbol: String,
    pub persona: String,
    pub prompt: String,
}

impl PromptRecord {
    pub fn new(symbol: &str, persona: &str, prompt: &str) -> Self {
        Self {
            created_at: chrono::Local::now().naive_local(),
            symbol: symbol.to_string(),
            persona: persona.to_string(),
            prompt: prompt.to_string(),
        }
    }

    /// `14:03:27 - NVDA Analysis`
    pub fn heading(&self) -> String {
        format!("{} - {} Analysis", self.created_at.format("%H:%M:%S"), self.symbol)
    }
}
