//! Ticker symbol normalisation.

use crate::domain::error::OllieError;

pub const MAX_SYMBOL_LEN: usize = 16;

/// Trim and upper-case a user-supplied ticker.
///
/// Accepts `A-Z`, `0-9` and `. ^ = -` so index (`^VIX`), share-class
/// (`BRK.B`), futures (`CL=F`) and foreign listings (`RIO.AX`) pass.
pub fn normalize_symbol(input: &str) -> Result<String, OllieError> {
    let symbol = input.trim().to_uppercase();

    let invalid = |reason: &str| OllieError::InvalidSymbol {
        symbol: input.trim().to_string(),
        reason: reason.to_string(),
    };

    if symbol.is_empty() {
        return Err(invalid("symbol is empty"));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(invalid("symbol is too long"));
    }
    if let Some(c) = symbol
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')))
    {
        return Err(invalid(&format!("unexpected character {c:?}")));
    }

    Ok(symbol)
}
