//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod google_news_adapter;
pub mod history_csv_adapter;
pub mod watchlist_file_adapter;
pub mod yahoo_adapter;
