#![allow(dead_code)]

use chrono::NaiveDate;
use ollie::domain::error::OllieError;
use ollie::domain::fundamentals::CompanyProfile;
use ollie::domain::history_range::HistoryRange;
use ollie::domain::news::NewsItem;
pub use ollie::domain::ohlcv::OhlcvBar;
use ollie::ports::market_data_port::{PriceHistoryPort, ProfilePort};
use ollie::ports::news_port::NewsPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockMarketData {
    pub bars: HashMap<String, Vec<OhlcvBar>>,
    pub profiles: HashMap<String, CompanyProfile>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, HistoryRange)>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
            profiles: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.bars.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_profile(mut self, symbol: &str, profile: CompanyProfile) -> Self {
        self.profiles.insert(symbol.to_string(), profile);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn requested_symbols(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|(s, _)| s.clone()).collect()
    }
}

impl PriceHistoryPort for MockMarketData {
    fn fetch_ohlcv(&self, symbol: &str, range: HistoryRange) -> Result<Vec<OhlcvBar>, OllieError> {
        self.requests.borrow_mut().push((symbol.to_string(), range));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(OllieError::http("mock://chart", reason));
        }
        Ok(self.bars.get(symbol).cloned().unwrap_or_default())
    }
}

impl ProfilePort for MockMarketData {
    fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile, OllieError> {
        Ok(self.profiles.get(symbol).cloned().unwrap_or_default())
    }
}

pub struct MockNews {
    pub name: &'static str,
    pub items: Vec<NewsItem>,
    pub fail: bool,
    pub calls: RefCell<usize>,
}

impl MockNews {
    pub fn with_items(name: &'static str, items: Vec<NewsItem>) -> Self {
        Self {
            name,
            items,
            fail: false,
            calls: RefCell::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            items: Vec::new(),
            fail: true,
            calls: RefCell::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.borrow()
    }
}

impl NewsPort for MockNews {
    fn source_name(&self) -> &str {
        self.name
    }

    fn fetch_headlines(&self, _symbol: &str, limit: usize) -> Result<Vec<NewsItem>, OllieError> {
        *self.calls.borrow_mut() += 1;
        if self.fail {
            return Err(OllieError::http("mock://news", "connection reset"));
        }
        Ok(self.items.iter().take(limit).cloned().collect())
    }
}

pub fn headlines(n: usize, publisher: &str) -> Vec<NewsItem> {
    (1..=n)
        .map(|i| NewsItem::new(format!("Headline {}", i), publisher))
        .collect()
}

pub fn make_bar(symbol: &str, date: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000_000,
    }
}

/// Consecutive daily bars starting 2024-01-01 with the given closes.
pub fn bars_from_closes(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            symbol: symbol.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000_000 + i as i64,
        })
        .collect()
}

/// A gently rising, oscillating series long enough for MACD(12,26,9).
pub fn trending_bars(symbol: &str, n: usize) -> Vec<OhlcvBar> {
    let closes: Vec<f64> = (0..n)
        .map(|i| 100.0 + i as f64 * 0.5 + if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    bars_from_closes(symbol, &closes)
}

pub fn sample_profile() -> CompanyProfile {
    CompanyProfile {
        sector: Some("Technology".into()),
        forward_pe: Some(28.4),
        beta: Some(1.29),
        market_cap: Some(2.65e12),
        fifty_two_week_high: Some(199.62),
        fifty_two_week_low: Some(164.08),
        target_mean_price: Some(210.5),
        recommendation_key: Some("strong_buy".into()),
        gross_margins: Some(0.4523),
        return_on_equity: Some(1.47),
        free_cashflow: Some(9.98e10),
        short_ratio: Some(1.2),
        earnings_dates: vec![NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()],
        insider_transactions: Vec::new(),
    }
}
