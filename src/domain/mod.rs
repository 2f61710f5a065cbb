//! Core domain types and logic.

pub mod config_validation;
pub mod dataset;
pub mod error;
pub mod format;
pub mod fundamentals;
pub mod history;
pub mod history_range;
pub mod indicator;
pub mod macro_context;
pub mod news;
pub mod ohlcv;
pub mod persona;
pub mod prompt;
pub mod symbol;
pub mod technicals;
pub mod watchlist;
