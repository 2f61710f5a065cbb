//! Port traits: the boundary between domain logic and data sources.

pub mod config_port;
pub mod history_port;
pub mod market_data_port;
pub mod news_port;
pub mod watchlist_port;
