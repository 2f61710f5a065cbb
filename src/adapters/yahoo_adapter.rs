//! Yahoo Finance adapter.
//!
//! Daily bars come from the v8 chart endpoint, fundamentals from v10
//! quoteSummary and headlines from v1 search. quoteSummary rejects requests
//! without a session crumb, which is obtained once per adapter and cached.

use crate::domain::error::OllieError;
use crate::domain::fundamentals::{CompanyProfile, InsiderTransaction, INSIDER_LIMIT};
use crate::domain::history_range::HistoryRange;
use crate::domain::news::NewsItem;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::market_data_port::{PriceHistoryPort, ProfilePort};
use crate::ports::news_port::NewsPort;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
const CONSENT_URL: &str = "https://fc.yahoo.com";
const SOURCE_NAME: &str = "Yahoo Finance";

const PROFILE_MODULES: &str = "financialData,defaultKeyStatistics,summaryDetail,\
assetProfile,calendarEvents,insiderTransactions";

pub struct YahooAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    crumb: RefCell<Option<String>>,
}

impl YahooAdapter {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, OllieError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| OllieError::http(base_url, e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            crumb: RefCell::new(None),
        })
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<(u16, String), OllieError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| OllieError::http(url, e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| OllieError::http(url, e))?;
        Ok((status, body))
    }

    fn crumb(&self) -> Option<String> {
        if let Some(crumb) = self.crumb.borrow().as_ref() {
            return Some(crumb.clone());
        }

        // only the Set-Cookie header matters, the status is usually 404
        if let Err(e) = self.client.get(CONSENT_URL).send() {
            log::debug!("consent cookie request failed: {}", e);
        }

        let url = format!("{}/v1/test/getcrumb", self.base_url);
        match self.get(&url, &[]) {
            Ok((200, body)) if !body.trim().is_empty() && !body.contains('<') => {
                let crumb = body.trim().to_string();
                *self.crumb.borrow_mut() = Some(crumb.clone());
                Some(crumb)
            }
            Ok((status, _)) => {
                log::warn!("no Yahoo crumb (HTTP {}), fundamentals may be refused", status);
                None
            }
            Err(e) => {
                log::warn!("no Yahoo crumb: {}", e);
                None
            }
        }
    }
}

impl PriceHistoryPort for YahooAdapter {
    fn fetch_ohlcv(&self, symbol: &str, range: HistoryRange) -> Result<Vec<OhlcvBar>, OllieError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let (status, body) = self.get(&url, &[("range", range.as_str()), ("interval", "1d")])?;

        match parse_chart(symbol, &body) {
            Ok(bars) => Ok(bars),
            Err(OllieError::ResponseParse { reason, .. }) if !(200..300).contains(&status) => {
                Err(OllieError::http(&url, format!("HTTP {}: {}", status, reason)))
            }
            Err(e) => Err(e),
        }
    }
}

impl ProfilePort for YahooAdapter {
    fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile, OllieError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);
        let crumb = self.crumb();

        let mut query = vec![("modules", PROFILE_MODULES)];
        if let Some(crumb) = crumb.as_deref() {
            query.push(("crumb", crumb));
        }

        let (status, body) = self.get(&url, &query)?;
        if status == 401 {
            self.crumb.borrow_mut().take();
        }
        if status == 404 {
            return Err(OllieError::NoData {
                symbol: symbol.to_string(),
            });
        }
        if !(200..300).contains(&status) {
            return Err(OllieError::http(&url, format!("HTTP {}", status)));
        }
        parse_quote_summary(&body)
    }
}

impl NewsPort for YahooAdapter {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch_headlines(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, OllieError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let count = limit.to_string();
        let (status, body) = self.get(
            &url,
            &[("q", symbol), ("newsCount", &count), ("quotesCount", "0")],
        )?;
        if !(200..300).contains(&status) {
            return Err(OllieError::http(&url, format!("HTTP {}", status)));
        }
        let mut items = parse_search_news(&body)?;
        items.truncate(limit);
        Ok(items)
    }
}

// Chart endpoint

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

/// Parses a v8 chart body into daily bars, oldest first.
///
/// Rows without a close (halted sessions, the still-open bar on some
/// exchanges) are skipped. Missing open/high/low fall back to the close.
pub fn parse_chart(symbol: &str, body: &str) -> Result<Vec<OhlcvBar>, OllieError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| OllieError::response(SOURCE_NAME, e.to_string()))?;

    if let Some(error) = response.chart.error {
        if error.code.eq_ignore_ascii_case("not found") {
            return Err(OllieError::NoData {
                symbol: symbol.to_string(),
            });
        }
        return Err(OllieError::response(
            SOURCE_NAME,
            format!(
                "{}: {}",
                error.code,
                error.description.unwrap_or_default()
            ),
        ));
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(OllieError::NoData {
            symbol: symbol.to_string(),
        });
    };

    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = data.meta.gmtoffset;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        let pick = |series: &[Option<f64>]| series.get(i).copied().flatten().unwrap_or(close);

        bars.push(OhlcvBar {
            symbol: symbol.to_string(),
            date,
            open: pick(&quote.open),
            high: pick(&quote.high),
            low: pick(&quote.low),
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    Ok(bars)
}

// quoteSummary endpoint

fn raw_f64(module: Option<&Value>, key: &str) -> Option<f64> {
    let value = module?.get(key)?;
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(_) => value.get("raw")?.as_f64(),
        _ => None,
    }
}

fn date_from(value: &Value) -> Option<NaiveDate> {
    if let Some(fmt) = value.get("fmt").and_then(Value::as_str) {
        if let Ok(date) = NaiveDate::parse_from_str(fmt, "%Y-%m-%d") {
            return Some(date);
        }
    }
    let ts = value.get("raw").and_then(Value::as_i64).or_else(|| value.as_i64())?;
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Parses a v10 quoteSummary body. Every field is optional; an empty module
/// list yields a profile of `None`s.
pub fn parse_quote_summary(body: &str) -> Result<CompanyProfile, OllieError> {
    let root: Value =
        serde_json::from_str(body).map_err(|e| OllieError::response(SOURCE_NAME, e.to_string()))?;
    let summary = root
        .get("quoteSummary")
        .ok_or_else(|| OllieError::response(SOURCE_NAME, "missing quoteSummary"))?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(OllieError::response(SOURCE_NAME, description));
    }

    let Some(result) = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
    else {
        return Ok(CompanyProfile::default());
    };

    let financial = result.get("financialData");
    let stats = result.get("defaultKeyStatistics");
    let detail = result.get("summaryDetail");

    let earnings_dates = result
        .pointer("/calendarEvents/earnings/earningsDate")
        .and_then(Value::as_array)
        .map(|dates| dates.iter().filter_map(date_from).collect())
        .unwrap_or_default();

    let insider_transactions = result
        .pointer("/insiderTransactions/transactions")
        .and_then(Value::as_array)
        .map(|txs| {
            txs.iter()
                .take(INSIDER_LIMIT)
                .map(|tx| InsiderTransaction {
                    filer_name: tx
                        .get("filerName")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    text: tx
                        .get("transactionText")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    shares: raw_f64(Some(tx), "shares").map(|s| s.round() as i64),
                    date: tx.get("startDate").and_then(date_from),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CompanyProfile {
        sector: result
            .pointer("/assetProfile/sector")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        forward_pe: raw_f64(stats, "forwardPE").or_else(|| raw_f64(detail, "forwardPE")),
        beta: raw_f64(detail, "beta").or_else(|| raw_f64(stats, "beta")),
        market_cap: raw_f64(detail, "marketCap"),
        fifty_two_week_high: raw_f64(detail, "fiftyTwoWeekHigh"),
        fifty_two_week_low: raw_f64(detail, "fiftyTwoWeekLow"),
        target_mean_price: raw_f64(financial, "targetMeanPrice"),
        recommendation_key: financial
            .and_then(|f| f.get("recommendationKey"))
            .and_then(Value::as_str)
            .map(str::to_string),
        gross_margins: raw_f64(financial, "grossMargins"),
        return_on_equity: raw_f64(financial, "returnOnEquity"),
        free_cashflow: raw_f64(financial, "freeCashflow"),
        short_ratio: raw_f64(stats, "shortRatio"),
        earnings_dates,
        insider_transactions,
    })
}

// Search endpoint

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
struct SearchNews {
    title: Option<String>,
    publisher: Option<String>,
}

pub fn parse_search_news(body: &str) -> Result<Vec<NewsItem>, OllieError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| OllieError::response(SOURCE_NAME, e.to_string()))?;

    Ok(response
        .news
        .into_iter()
        .filter_map(|n| {
            let title = n.title.filter(|t| !t.trim().is_empty())?;
            let publisher = n
                .publisher
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| SOURCE_NAME.to_string());
            Some(NewsItem::new(title, publisher))
        })
        .collect())
}
