//! Watchlist stored as a plain text file, one symbol per line.

use crate::domain::error::OllieError;
use crate::domain::symbol::normalize_symbol;
use crate::domain::watchlist::{default_watchlist, parse_watchlist};
use crate::ports::watchlist_port::WatchlistPort;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub struct WatchlistFileAdapter {
    path: PathBuf,
}

impl WatchlistFileAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl WatchlistPort for WatchlistFileAdapter {
    /// A missing or unreadable file yields the default watchlist.
    fn load(&self) -> Result<Vec<String>, OllieError> {
        if !self.path.exists() {
            return Ok(default_watchlist());
        }
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_watchlist(&content)),
            Err(e) => {
                log::warn!(
                    "watchlist {} unreadable ({}), using defaults",
                    self.path.display(),
                    e
                );
                Ok(default_watchlist())
            }
        }
    }

    fn add(&self, symbol: &str) -> Result<bool, OllieError> {
        let symbol = normalize_symbol(symbol)?;
        let existing = self.load()?;
        if existing.contains(&symbol) {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // first write materializes the defaults so they are not lost
        if !self.path.exists() {
            let mut content = existing.join("\n");
            content.push('\n');
            content.push_str(&symbol);
            content.push('\n');
            fs::write(&self.path, content)?;
        } else {
            let current = fs::read_to_string(&self.path)?;
            let mut file = OpenOptions::new().append(true).open(&self.path)?;
            if !current.is_empty() && !current.ends_with('\n') {
                writeln!(file)?;
            }
            writeln!(file, "{}", symbol)?;
        }
        log::debug!("added {} to {}", symbol, self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let adapter = WatchlistFileAdapter::new(dir.path().join("watchlist.txt"));
        assert_eq!(adapter.load().unwrap(), vec!["AAPL", "TSLA", "NVDA"]);
    }

    #[test]
    fn non_utf8_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.txt");
        fs::write(&path, [0xff, 0xfe, 0x0a, 0x41]).unwrap();
        let adapter = WatchlistFileAdapter::new(path);
        assert_eq!(adapter.load().unwrap(), vec!["AAPL", "TSLA", "NVDA"]);
    }

    #[test]
    fn directory_at_path_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.txt");
        fs::create_dir(&path).unwrap();
        let adapter = WatchlistFileAdapter::new(path);
        assert_eq!(adapter.load().unwrap(), vec!["AAPL", "TSLA", "NVDA"]);
    }

    #[test]
    fn add_new_symbol_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let adapter = WatchlistFileAdapter::new(dir.path().join("watchlist.txt"));

        assert!(adapter.add("msft").unwrap());
        assert_eq!(adapter.load().unwrap(), vec!["AAPL", "TSLA", "NVDA", "MSFT"]);
    }

    #[test]
    fn add_duplicate_refused() {
        let dir = TempDir::new().unwrap();
        let adapter = WatchlistFileAdapter::new(dir.path().join("watchlist.txt"));

        assert!(!adapter.add(" tsla ").unwrap());
        assert!(!dir.path().join("watchlist.txt").exists());
    }

    #[test]
    fn add_appends_to_file_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.txt");
        fs::write(&path, "AMD").unwrap();
        let adapter = WatchlistFileAdapter::new(path);

        assert!(adapter.add("INTC").unwrap());
        assert_eq!(adapter.load().unwrap(), vec!["AMD", "INTC"]);
    }

    #[test]
    fn add_rejects_invalid_symbol() {
        let dir = TempDir::new().unwrap();
        let adapter = WatchlistFileAdapter::new(dir.path().join("watchlist.txt"));
        assert!(matches!(
            adapter.add("not a ticker"),
            Err(OllieError::InvalidSymbol { .. })
        ));
    }
}
