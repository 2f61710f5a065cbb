//! Google News RSS search, the fallback headline source.

use crate::domain::error::OllieError;
use crate::domain::news::NewsItem;
use crate::ports::news_port::NewsPort;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://news.google.com";
const SOURCE_NAME: &str = "Google News";

pub struct GoogleNewsAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl GoogleNewsAdapter {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, OllieError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| OllieError::http(base_url, e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl NewsPort for GoogleNewsAdapter {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch_headlines(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, OllieError> {
        let url = format!("{}/rss/search", self.base_url);
        let query = format!("{} stock", symbol);
        log::debug!("GET {} q={:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .map_err(|e| OllieError::http(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OllieError::http(&url, format!("HTTP {}", status.as_u16())));
        }
        let body = response.text().map_err(|e| OllieError::http(&url, e))?;
        parse_rss(&body, limit)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Source,
}

/// Extracts `<item>` titles and `<source>` names from an RSS 2.0 feed.
pub fn parse_rss(xml: &str, limit: usize) -> Result<Vec<NewsItem>, OllieError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut field: Option<Field> = None;
    let mut title = String::new();
    let mut source = String::new();

    loop {
        if items.len() >= limit {
            break;
        }
        let event = reader
            .read_event()
            .map_err(|e| OllieError::response(SOURCE_NAME, e.to_string()))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    source.clear();
                }
                b"title" if in_item => field = Some(Field::Title),
                b"source" if in_item => field = Some(Field::Source),
                _ => {}
            },
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| OllieError::response(SOURCE_NAME, e.to_string()))?;
                push_text(field, &text, &mut title, &mut source);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                push_text(field, &text, &mut title, &mut source);
            }
            Event::End(e) => match e.name().as_ref() {
                b"item" => {
                    in_item = false;
                    let headline = title.trim();
                    if !headline.is_empty() {
                        let publisher = match source.trim() {
                            "" => SOURCE_NAME,
                            s => s,
                        };
                        items.push(NewsItem::new(headline, publisher));
                    }
                }
                b"title" | b"source" => field = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

fn push_text(field: Option<Field>, text: &str, title: &mut String, source: &mut String) {
    match field {
        Some(Field::Title) => title.push_str(text),
        Some(Field::Source) => source.push_str(text),
        None => {}
    }
}
