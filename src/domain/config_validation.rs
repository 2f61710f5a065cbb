//! Configuration validation.
//!
//! Validates every configured field before any request is made. Absent keys
//! are fine: they take their defaults.

use std::path::Path;

use crate::domain::error::OllieError;
use crate::domain::history_range::HistoryRange;
use crate::domain::indicator::RsiSmoothing;
use crate::domain::persona;
use crate::domain::prompt::PromptStyle;
use crate::ports::config_port::ConfigPort;

pub const MAX_NEWS_LIMIT: i64 = 20;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), OllieError> {
    validate_data(config)?;
    validate_technicals(config)?;
    validate_news(config)?;
    validate_prompt(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> OllieError {
    OllieError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_data(config: &dyn ConfigPort) -> Result<(), OllieError> {
    if let Some(range) = config.get_string("data", "history_range") {
        range
            .parse::<HistoryRange>()
            .map_err(|e| invalid("data", "history_range", e))?;
    }
    if config.get_int("data", "timeout_secs", 20) <= 0 {
        return Err(invalid("data", "timeout_secs", "timeout_secs must be positive"));
    }
    if let Some(dir) = config.get_string("data", "data_dir") {
        if !Path::new(dir.trim()).is_dir() {
            return Err(invalid("data", "data_dir", format!("{} is not a directory", dir)));
        }
    }
    Ok(())
}

fn validate_positive(config: &dyn ConfigPort, key: &str, default: i64) -> Result<i64, OllieError> {
    let value = config.get_int("technicals", key, default);
    if value <= 0 {
        return Err(invalid("technicals", key, format!("{} must be positive", key)));
    }
    Ok(value)
}

fn validate_technicals(config: &dyn ConfigPort) -> Result<(), OllieError> {
    validate_positive(config, "ma_period", 20)?;
    validate_positive(config, "rsi_period", 14)?;
    validate_positive(config, "macd_signal", 9)?;
    let fast = validate_positive(config, "macd_fast", 12)?;
    let slow = validate_positive(config, "macd_slow", 26)?;
    if fast >= slow {
        return Err(invalid(
            "technicals",
            "macd_fast",
            "macd_fast must be smaller than macd_slow",
        ));
    }
    if config.get_int("technicals", "change_lookback", 5) < 2 {
        return Err(invalid(
            "technicals",
            "change_lookback",
            "change_lookback must be at least 2",
        ));
    }
    if let Some(smoothing) = config.get_string("technicals", "rsi_smoothing") {
        smoothing
            .parse::<RsiSmoothing>()
            .map_err(|e| invalid("technicals", "rsi_smoothing", e))?;
    }
    Ok(())
}

fn validate_news(config: &dyn ConfigPort) -> Result<(), OllieError> {
    let limit = config.get_int("news", "limit", 5);
    if !(1..=MAX_NEWS_LIMIT).contains(&limit) {
        return Err(invalid(
            "news",
            "limit",
            format!("limit must be between 1 and {}", MAX_NEWS_LIMIT),
        ));
    }
    if let Some(fallback) = config.get_string("news", "fallback") {
        match fallback.trim().to_lowercase().as_str() {
            "google" | "none" => {}
            other => {
                return Err(invalid(
                    "news",
                    "fallback",
                    format!("unknown fallback {other:?} (expected google or none)"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_prompt(config: &dyn ConfigPort) -> Result<(), OllieError> {
    let style = match config.get_string("prompt", "style") {
        Some(s) => s.parse::<PromptStyle>().map_err(|e| invalid("prompt", "style", e))?,
        None => PromptStyle::default(),
    };
    if let Some(selector) = config.get_string("prompt", "persona") {
        if persona::find(style, &selector).is_none() {
            return Err(invalid(
                "prompt",
                "persona",
                format!("no {} persona named {:?}", style, selector),
            ));
        }
    }
    if let Some(path) = config.get_string("prompt", "template_path") {
        if !Path::new(path.trim()).is_file() {
            return Err(invalid("prompt", "template_path", format!("{} not found", path)));
        }
    }
    Ok(())
}
