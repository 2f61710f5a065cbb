//! Watchlist parsing.

pub const DEFAULT_WATCHLIST: &[&str] = &["AAPL", "TSLA", "NVDA"];

/// One symbol per line; blanks skipped, upper-cased, first occurrence kept.
pub fn parse_watchlist(content: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for line in content.lines() {
        let symbol = line.trim().to_uppercase();
        if symbol.is_empty() || symbols.contains(&symbol) {
            continue;
        }
        symbols.push(symbol);
    }
    symbols
}

pub fn default_watchlist() -> Vec<String> {
    DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()
}
