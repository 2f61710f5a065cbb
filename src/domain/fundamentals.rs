//! Company fundamentals, analyst consensus and insider activity.

use chrono::NaiveDate;

use crate::domain::format::{format_shares, NOT_AVAILABLE};

/// Maximum insider transactions carried into a prompt.
pub const INSIDER_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyProfile {
    pub sector: Option<String>,
    pub forward_pe: Option<f64>,
    pub beta: Option<f64>,
    pub market_cap: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub target_mean_price: Option<f64>,
    pub recommendation_key: Option<String>,
    pub gross_margins: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub free_cashflow: Option<f64>,
    pub short_ratio: Option<f64>,
    pub earnings_dates: Vec<NaiveDate>,
    pub insider_transactions: Vec<InsiderTransaction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsiderTransaction {
    pub filer_name: String,
    pub text: String,
    pub shares: Option<i64>,
    pub date: Option<NaiveDate>,
}

impl InsiderTransaction {
    pub fn summary_line(&self) -> String {
        let text = if self.text.trim().is_empty() {
            self.filer_name.trim()
        } else {
            self.text.trim()
        };
        let shares = self
            .shares
            .map(format_shares)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        format!("{} ({} shares)", text, shares)
    }
}

impl CompanyProfile {
    /// Upcoming earnings date, or the published window when it spans two dates.
    pub fn next_earnings(&self) -> String {
        match self.earnings_dates.as_slice() {
            [] => NOT_AVAILABLE.to_string(),
            [only] => only.format("%Y-%m-%d").to_string(),
            [first, .., last] if first == last => first.format("%Y-%m-%d").to_string(),
            [first, .., last] => format!(
                "{} to {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            ),
        }
    }

    pub fn insider_summary(&self) -> String {
        if self.insider_transactions.is_empty() {
            return "No recent data".to_string();
        }
        self.insider_transactions
            .iter()
            .take(INSIDER_LIMIT)
            .map(InsiderTransaction::summary_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
