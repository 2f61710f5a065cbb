//! Prompt assembly.
//!
//! A template is plain text with `{{PLACEHOLDER}}` markers. [`resolve`]
//! substitutes every known marker from a [`PromptContext`] in one pass, so
//! substituted values are never scanned again. Markers it does not know are
//! left in place and logged.

pub mod templates;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::dataset::StockDataset;
use crate::domain::format::{
    format_billions, format_fraction_pct, format_number, format_percent, format_price,
    format_recommendation, format_shares, or_not_available, NOT_AVAILABLE,
};
use crate::domain::news::render_news_list;
use crate::domain::persona::Persona;
use crate::domain::technicals::TechnicalsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// Analyst deep dive on a single stock.
    #[default]
    Expert,
    /// Investor persona with macro, insider and earnings context.
    Macro,
}

impl PromptStyle {
    pub fn builtin_template(&self) -> &'static str {
        match self {
            PromptStyle::Expert => templates::EXPERT_TEMPLATE,
            PromptStyle::Macro => templates::MACRO_TEMPLATE,
        }
    }

    pub fn needs_macro_context(&self) -> bool {
        matches!(self, PromptStyle::Macro)
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptStyle::Expert => write!(f, "expert"),
            PromptStyle::Macro => write!(f, "macro"),
        }
    }
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expert" => Ok(PromptStyle::Expert),
            "macro" => Ok(PromptStyle::Macro),
            other => Err(format!("unknown prompt style {other:?} (expected expert or macro)")),
        }
    }
}

pub struct PromptContext<'a> {
    pub dataset: &'a StockDataset,
    pub persona: &'a Persona,
    pub technicals: &'a TechnicalsConfig,
}

fn placeholders(ctx: &PromptContext) -> Vec<(&'static str, String)> {
    let price = &ctx.dataset.price;
    let profile = &ctx.dataset.profile;
    let macro_ctx = ctx.dataset.macro_context.as_ref();
    let tech = ctx.technicals;

    let macd = match price.macd {
        Some(m) => format!(
            "line {:.2} / signal {:.2} / histogram {:.2}",
            m.line, m.signal, m.histogram
        ),
        None => NOT_AVAILABLE.to_string(),
    };

    vec![
        ("PERSONA_NAME", ctx.persona.name.to_string()),
        ("PERSONA_INSTRUCTION", ctx.persona.instruction.to_string()),
        ("SYMBOL", ctx.dataset.symbol.clone()),
        ("AS_OF", price.as_of.format("%Y-%m-%d").to_string()),
        ("LATEST_CLOSE", format_price(Some(price.latest_close))),
        ("CHANGE_PCT", format_percent(price.change_pct)),
        ("MA_PERIOD", tech.ma_period.to_string()),
        ("MA_VALUE", format_price(price.moving_average)),
        ("RSI_PERIOD", tech.rsi_period.to_string()),
        ("RSI_VALUE", format_number(price.rsi)),
        (
            "MACD_PARAMS",
            format!("{}/{}/{}", tech.macd_fast, tech.macd_slow, tech.macd_signal),
        ),
        ("MACD", macd),
        ("VOLUME", format_shares(price.volume)),
        ("BETA", format_number(profile.beta)),
        ("MARKET_CAP", format_billions(profile.market_cap)),
        ("FORWARD_PE", format_number(profile.forward_pe)),
        ("GROSS_MARGINS", format_fraction_pct(profile.gross_margins)),
        ("ROE", format_fraction_pct(profile.return_on_equity)),
        ("FREE_CASHFLOW", format_billions(profile.free_cashflow)),
        ("WEEK52_LOW", format_price(profile.fifty_two_week_low)),
        ("WEEK52_HIGH", format_price(profile.fifty_two_week_high)),
        ("TARGET_PRICE", format_price(profile.target_mean_price)),
        (
            "RECOMMENDATION",
            format_recommendation(profile.recommendation_key.as_deref()),
        ),
        ("SECTOR", or_not_available(profile.sector.as_deref())),
        ("SHORT_RATIO", format_number(profile.short_ratio)),
        ("INSIDER_ACTIVITY", profile.insider_summary()),
        ("NEXT_EARNINGS", profile.next_earnings()),
        ("NEWS", render_news_list(&ctx.dataset.news)),
        ("VIX", format_number(macro_ctx.and_then(|m| m.vix))),
        (
            "TEN_YEAR_YIELD",
            format_percent(macro_ctx.and_then(|m| m.ten_year_yield)),
        ),
        (
            "SPY_CHANGE",
            format_percent(macro_ctx.and_then(|m| m.spy_change_pct)),
        ),
    ]
}

/// Resolve all known `{{PLACEHOLDER}}`s in `template`.
pub fn resolve(template: &str, ctx: &PromptContext) -> String {
    let values: HashMap<&str, String> = placeholders(ctx).into_iter().collect();
    let mut output = String::with_capacity(template.len() * 2);
    let mut unknown: Vec<&str> = Vec::new();

    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        output.push_str(&rest[..start]);
        let name = &after[..end];
        match values.get(name) {
            Some(value) => output.push_str(value),
            None => {
                output.push_str(&rest[start..start + end + 4]);
                let name = name.trim();
                if !name.is_empty() && !unknown.contains(&name) {
                    unknown.push(name);
                }
            }
        }
        rest = &after[end + 2..];
    }
    output.push_str(rest);

    if !unknown.is_empty() {
        log::warn!("template has unknown placeholders: {}", unknown.join(", "));
    }
    output
}

/// Names of `{{...}}` markers still present in `text`, in order of appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                if !name.is_empty() && !found.iter().any(|f: &String| f == name) {
                    found.push(name.to_string());
                }
                rest = &after[end + 2..];
            }
            None => break,
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fundamentals::CompanyProfile;
    use crate::domain::macro_context::MacroContext;
    use crate::domain::news::NewsItem;
    use crate::domain::persona;
    use crate::domain::technicals::{MacdSnapshot, PriceSummary};
    use chrono::NaiveDate;

    fn sample_dataset() -> StockDataset {
        StockDataset {
            symbol: "NVDA".into(),
            price: PriceSummary {
                symbol: "NVDA".into(),
                as_of: NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
                latest_close: 1208.884,
                change_pct: Some(5.126),
                moving_average: Some(1001.5),
                rsi: Some(71.239),
                macd: Some(MacdSnapshot {
                    line: 52.1,
                    signal: 40.0,
                    histogram: 12.1,
                }),
                volume: 41_238_500,
            },
            profile: CompanyProfile {
                sector: Some("Technology".into()),
                forward_pe: Some(46.12),
                beta: Some(1.68),
                market_cap: Some(2_973_000_000_000.0),
                fifty_two_week_high: Some(1216.92),
                fifty_two_week_low: Some(373.56),
                target_mean_price: Some(1240.0),
                recommendation_key: Some("strong_buy".into()),
                gross_margins: Some(0.7529),
                return_on_equity: Some(1.1541),
                free_cashflow: Some(29_000_000_000.0),
                short_ratio: Some(1.04),
                ..Default::default()
            },
            news: vec![NewsItem::new("Nvidia hits record", "Reuters")],
            macro_context: Some(MacroContext {
                vix: Some(12.22),
                ten_year_yield: Some(4.43),
                spy_change_pct: Some(1.3),
            }),
        }
    }

    #[test]
    fn expert_template_fully_resolved() {
        let dataset = sample_dataset();
        let tech = TechnicalsConfig::default();
        let ctx = PromptContext {
            dataset: &dataset,
            persona: persona::resolve(PromptStyle::Expert, Some("3")),
            technicals: &tech,
        };
        let prompt = resolve(PromptStyle::Expert.builtin_template(), &ctx);

        assert!(unresolved_placeholders(&prompt).is_empty());
        assert!(prompt.starts_with("You are a Technical & Momentum Specialist. Your goal is: "));
        assert!(prompt.contains("### 📊 DATASET FOR NVDA ###"));
        assert!(prompt.contains("- Latest Close Price: $1208.88 (as of 2024-06-07)"));
        assert!(prompt.contains("- Weekly Change: 5.13%"));
        assert!(prompt.contains("- 20-Day Moving Average (MA20): $1001.50"));
        assert!(prompt.contains("- RSI (14-Day): 71.24"));
        assert!(prompt.contains("- MACD (12/26/9): line 52.10 / signal 40.00 / histogram 12.10"));
        assert!(prompt.contains("- Volume: 41,238,500"));
        assert!(prompt.contains("- Market Cap: 2973.00B"));
        assert!(prompt.contains("- Gross Margins: 75.29%"));
        assert!(prompt.contains("- 52-Week Range: $373.56 - $1216.92"));
        assert!(prompt.contains("- Analyst Recommendation: Strong buy"));
        assert!(prompt.contains("- Nvidia hits record (Source: Reuters)"));
    }

    #[test]
    fn macro_template_fully_resolved() {
        let dataset = sample_dataset();
        let tech = TechnicalsConfig::default();
        let ctx = PromptContext {
            dataset: &dataset,
            persona: persona::resolve(PromptStyle::Macro, Some("burry")),
            technicals: &tech,
        };
        let prompt = resolve(PromptStyle::Macro.builtin_template(), &ctx);

        assert!(unresolved_placeholders(&prompt).is_empty());
        assert!(prompt.starts_with("You are Michael Burry. Your objective is: Contrarian/Bubble skepticism"));
        assert!(prompt.contains("- VIX Index: 12.22 (Volatility check)"));
        assert!(prompt.contains("- 10Y Yield: 4.43% (Interest rate pressure)"));
        assert!(prompt.contains("- SPY Weekly: 1.30% (Market Benchmark)"));
        assert!(prompt.contains("No recent data"));
        assert!(prompt.contains("- Sector: Technology"));
        assert!(prompt.contains("- **NEXT EARNINGS DATE**: N/A"));
    }

    #[test]
    fn missing_values_render_not_available() {
        let mut dataset = sample_dataset();
        dataset.price.rsi = None;
        dataset.price.macd = None;
        dataset.profile = CompanyProfile::default();
        dataset.macro_context = None;
        let tech = TechnicalsConfig::default();
        let ctx = PromptContext {
            dataset: &dataset,
            persona: persona::resolve(PromptStyle::Macro, None),
            technicals: &tech,
        };
        let prompt = resolve(PromptStyle::Macro.builtin_template(), &ctx);

        assert!(prompt.contains("- RSI (14-Day): N/A"));
        assert!(prompt.contains("- MACD (12/26/9): N/A"));
        assert!(prompt.contains("- VIX Index: N/A"));
        assert!(prompt.contains("- 10Y Yield: N/A (Interest rate pressure)"));
        assert!(prompt.contains("- SPY Weekly: N/A (Market Benchmark)"));
        assert!(prompt.contains("- Analyst Target Price (Mean): N/A"));
        assert!(prompt.contains("- Analyst Recommendation: N/A"));
        assert!(!prompt.contains("N/A%"));
        assert!(!prompt.contains("$N/A"));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let mut dataset = sample_dataset();
        dataset.news = vec![NewsItem::new("Traders eye {{VIX}} and {{SYMBOL}}", "Blog")];
        let tech = TechnicalsConfig::default();
        let ctx = PromptContext {
            dataset: &dataset,
            persona: persona::resolve(PromptStyle::Macro, None),
            technicals: &tech,
        };
        let prompt = resolve(PromptStyle::Macro.builtin_template(), &ctx);

        assert!(prompt.contains("- VIX Index: 12.22 (Volatility check)"));
        assert!(prompt.contains("- Traders eye {{VIX}} and {{SYMBOL}} (Source: Blog)"));
    }

    #[test]
    fn period_labels_follow_config() {
        let dataset = sample_dataset();
        let tech = TechnicalsConfig {
            ma_period: 50,
            rsi_period: 9,
            ..Default::default()
        };
        let ctx = PromptContext {
            dataset: &dataset,
            persona: persona::resolve(PromptStyle::Expert, None),
            technicals: &tech,
        };
        let prompt = resolve(PromptStyle::Expert.builtin_template(), &ctx);
        assert!(prompt.contains("- 50-Day Moving Average (MA50): $1001.50"));
        assert!(prompt.contains("- RSI (9-Day): 71.24"));
    }

    #[test]
    fn custom_template_unknown_markers_kept() {
        let dataset = sample_dataset();
        let tech = TechnicalsConfig::default();
        let ctx = PromptContext {
            dataset: &dataset,
            persona: persona::resolve(PromptStyle::Expert, None),
            technicals: &tech,
        };
        let prompt = resolve("{{SYMBOL}} closes at {{LATEST_CLOSE}}; {{DIVIDEND}}", &ctx);
        assert_eq!(prompt, "NVDA closes at $1208.88; {{DIVIDEND}}");
        assert_eq!(unresolved_placeholders(&prompt), vec!["DIVIDEND"]);
    }

    #[test]
    fn unresolved_scan_dedupes_and_ignores_unclosed() {
        assert_eq!(
            unresolved_placeholders("{{A}} {{ B }} {{A}} {{open"),
            vec!["A".to_string(), "B".to_string()]
        );
        assert!(unresolved_placeholders("no markers").is_empty());
    }

    #[test]
    fn style_from_str() {
        assert_eq!("MACRO".parse::<PromptStyle>(), Ok(PromptStyle::Macro));
        assert!("dashboard".parse::<PromptStyle>().is_err());
        assert!(PromptStyle::Macro.needs_macro_context());
        assert!(!PromptStyle::Expert.needs_macro_context());
    }
}
