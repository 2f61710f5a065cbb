//! Offline data directory adapter.
//!
//! Layout, one set of files per symbol:
//! - `{SYMBOL}.csv`: `date,open,high,low,close,volume` daily bars
//! - `{SYMBOL}.ini`: optional `[profile]` section with fundamentals
//! - `{SYMBOL}_news.csv`: optional `title,publisher` headlines

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::OllieError;
use crate::domain::fundamentals::CompanyProfile;
use crate::domain::history_range::HistoryRange;
use crate::domain::news::NewsItem;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::{PriceHistoryPort, ProfilePort};
use crate::ports::news_port::NewsPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn profile_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.ini", symbol))
    }

    fn news_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}_news.csv", symbol))
    }

    fn read_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, OllieError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(OllieError::NoData {
                symbol: symbol.to_string(),
            });
        }
        let content = fs::read_to_string(&path)?;
        let source = path.display().to_string();
        let parse_err = |reason: String| OllieError::response(&source, reason);

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| parse_err(format!("CSV parse error: {}", e)))?;
            let field = |idx: usize, name: &str| -> Result<&str, OllieError> {
                record
                    .get(idx)
                    .map(str::trim)
                    .ok_or_else(|| parse_err(format!("row {}: missing {} column", line + 1, name)))
            };
            let number = |idx: usize, name: &str| -> Result<f64, OllieError> {
                field(idx, name)?
                    .parse::<f64>()
                    .map_err(|e| parse_err(format!("row {}: invalid {} value: {}", line + 1, name, e)))
            };

            let date = NaiveDate::parse_from_str(field(0, "date")?, "%Y-%m-%d")
                .map_err(|e| parse_err(format!("row {}: invalid date format: {}", line + 1, e)))?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open: number(1, "open")?,
                high: number(2, "high")?,
                low: number(3, "low")?,
                close: number(4, "close")?,
                // volume may be written as a float by spreadsheet exports
                volume: number(5, "volume")?.round() as i64,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

impl PriceHistoryPort for CsvAdapter {
    /// Bars within the range, counted back from the newest bar on file.
    fn fetch_ohlcv(&self, symbol: &str, range: HistoryRange) -> Result<Vec<OhlcvBar>, OllieError> {
        let bars = self.read_bars(symbol)?;
        let Some(last) = bars.last().map(|b| b.date) else {
            return Ok(bars);
        };
        let cutoff = last - chrono::Duration::days(range.calendar_days());
        Ok(bars.into_iter().filter(|b| b.date > cutoff).collect())
    }
}

fn optional_f64(config: &dyn ConfigPort, key: &str) -> Result<Option<f64>, OllieError> {
    match config.get_string("profile", key) {
        None => Ok(None),
        Some(v) if v.trim().eq_ignore_ascii_case("n/a") => Ok(None),
        Some(v) => v.trim().parse::<f64>().map(Some).map_err(|_| OllieError::ConfigInvalid {
            section: "profile".into(),
            key: key.into(),
            reason: format!("{:?} is not a number", v),
        }),
    }
}

fn parse_earnings_dates(value: Option<String>) -> Result<Vec<NaiveDate>, OllieError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| OllieError::ConfigInvalid {
                section: "profile".into(),
                key: "earnings_date".into(),
                reason: format!("invalid date {:?}, expected YYYY-MM-DD", s),
            })
        })
        .collect()
}

impl ProfilePort for CsvAdapter {
    fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile, OllieError> {
        let path = self.profile_path(symbol);
        if !path.exists() {
            log::info!("no profile file {}, fundamentals unavailable", path.display());
            return Ok(CompanyProfile::default());
        }
        let config = FileConfigAdapter::from_file(&path)?;

        Ok(CompanyProfile {
            sector: config.get_string("profile", "sector"),
            forward_pe: optional_f64(&config, "forward_pe")?,
            beta: optional_f64(&config, "beta")?,
            market_cap: optional_f64(&config, "market_cap")?,
            fifty_two_week_high: optional_f64(&config, "fifty_two_week_high")?,
            fifty_two_week_low: optional_f64(&config, "fifty_two_week_low")?,
            target_mean_price: optional_f64(&config, "target_mean_price")?,
            recommendation_key: config.get_string("profile", "recommendation"),
            gross_margins: optional_f64(&config, "gross_margins")?,
            return_on_equity: optional_f64(&config, "return_on_equity")?,
            free_cashflow: optional_f64(&config, "free_cashflow")?,
            short_ratio: optional_f64(&config, "short_ratio")?,
            earnings_dates: parse_earnings_dates(config.get_string("profile", "earnings_date"))?,
            insider_transactions: Vec::new(),
        })
    }
}

impl NewsPort for CsvAdapter {
    fn source_name(&self) -> &str {
        "offline news"
    }

    fn fetch_headlines(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, OllieError> {
        let path = self.news_path(symbol);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&path).map_err(|e| {
            OllieError::response(&path.display().to_string(), e.to_string())
        })?;

        let mut items = Vec::new();
        for result in rdr.records().take(limit) {
            let record = result
                .map_err(|e| OllieError::response(&path.display().to_string(), e.to_string()))?;
            let title = record.get(0).unwrap_or_default().trim();
            let publisher = record
                .get(1)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or("Unknown");
            items.push(NewsItem::new(title, publisher));
        }
        Ok(items)
    }
}
