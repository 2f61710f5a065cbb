//! Headline collection with a fallback feed.

use crate::ports::news_port::NewsPort;

pub const DEFAULT_NEWS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, publisher: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            publisher: publisher.into(),
        }
    }
}

/// Headlines from `primary`, falling back to `fallback` when the primary
/// source fails or has nothing. Source failures never abort the request.
pub fn collect_headlines(
    primary: &dyn NewsPort,
    fallback: Option<&dyn NewsPort>,
    symbol: &str,
    limit: usize,
) -> Vec<NewsItem> {
    let headlines = fetch_clean(primary, symbol, limit);
    if !headlines.is_empty() {
        return headlines;
    }

    match fallback {
        Some(source) => {
            log::info!(
                "no headlines from {} for {}, trying {}",
                primary.source_name(),
                symbol,
                source.source_name()
            );
            fetch_clean(source, symbol, limit)
        }
        None => headlines,
    }
}

fn fetch_clean(source: &dyn NewsPort, symbol: &str, limit: usize) -> Vec<NewsItem> {
    match source.fetch_headlines(symbol, limit) {
        Ok(items) => items
            .into_iter()
            .filter(|n| !n.title.trim().is_empty())
            .take(limit)
            .collect(),
        Err(e) => {
            log::warn!("{} headlines unavailable for {}: {}", source.source_name(), symbol, e);
            Vec::new()
        }
    }
}

pub fn render_news_list(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return "- No recent headlines found.".to_string();
    }
    items
        .iter()
        .map(|n| format!("- {} (Source: {})", n.title.trim(), n.publisher.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
