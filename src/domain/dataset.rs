//! Per-request dataset assembly.

use crate::domain::error::OllieError;
use crate::domain::fundamentals::CompanyProfile;
use crate::domain::history_range::HistoryRange;
use crate::domain::macro_context::{self, MacroContext};
use crate::domain::news::{collect_headlines, NewsItem, DEFAULT_NEWS_LIMIT};
use crate::domain::symbol::normalize_symbol;
use crate::domain::technicals::{summarize, PriceSummary, TechnicalsConfig};
use crate::ports::market_data_port::{PriceHistoryPort, ProfilePort};
use crate::ports::news_port::NewsPort;

#[derive(Debug, Clone, PartialEq)]
pub struct StockDataset {
    pub symbol: String,
    pub price: PriceSummary,
    pub profile: CompanyProfile,
    pub news: Vec<NewsItem>,
    pub macro_context: Option<MacroContext>,
}

pub struct DataSources<'a> {
    pub prices: &'a dyn PriceHistoryPort,
    pub profiles: &'a dyn ProfilePort,
    pub news: Option<&'a dyn NewsPort>,
    pub fallback_news: Option<&'a dyn NewsPort>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyOptions {
    pub history_range: HistoryRange,
    pub technicals: TechnicalsConfig,
    pub news_limit: usize,
    pub include_macro: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            history_range: HistoryRange::default(),
            technicals: TechnicalsConfig::default(),
            news_limit: DEFAULT_NEWS_LIMIT,
            include_macro: false,
        }
    }
}

pub fn assemble(
    sources: &DataSources,
    symbol: &str,
    options: &AssemblyOptions,
) -> Result<StockDataset, OllieError> {
    let symbol = normalize_symbol(symbol)?;

    let bars = sources.prices.fetch_ohlcv(&symbol, options.history_range)?;
    if bars.is_empty() {
        return Err(OllieError::NoData { symbol });
    }
    log::debug!("{}: {} bars over {}", symbol, bars.len(), options.history_range);

    let price = summarize(&symbol, &bars, &options.technicals)?;
    let profile = sources.profiles.fetch_profile(&symbol)?;

    let news = match (sources.news, sources.fallback_news) {
        (Some(primary), fallback) => collect_headlines(primary, fallback, &symbol, options.news_limit),
        (None, Some(fallback)) => collect_headlines(fallback, None, &symbol, options.news_limit),
        (None, None) => Vec::new(),
    };

    let macro_context = options
        .include_macro
        .then(|| macro_context::gather(sources.prices));

    Ok(StockDataset {
        symbol,
        price,
        profile,
        news,
        macro_context,
    })
}
