//! Display formatting for prompt values.

pub const NOT_AVAILABLE: &str = "N/A";

/// Two decimals, or `N/A`.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Dollar amount: 128.5 → `$128.50`.
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("${:.2}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// A value already in percent: 1.578 → `1.58%`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// A fraction rendered as a percentage: 0.4512 → `45.12%`.
pub fn format_fraction_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Amount in billions: 2.85e12 → `2850.00B`.
pub fn format_billions(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}B", v / 1e9),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Integer with thousands separators: 12345678 → `12,345,678`.
pub fn format_shares(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `strong_buy` → `Strong buy`.
pub fn format_recommendation(key: Option<&str>) -> String {
    let key = match key.map(str::trim) {
        Some(k) if !k.is_empty() && !k.eq_ignore_ascii_case("none") => k,
        _ => return NOT_AVAILABLE.to_string(),
    };
    let spaced = key.replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn or_not_available(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
