//! Analyst and investor personas the model is asked to adopt.

use crate::domain::prompt::PromptStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub key: &'static str,
    pub name: &'static str,
    pub instruction: &'static str,
}

const ANALYSTS: &[Persona] = &[
    Persona {
        key: "1",
        name: "Standard/Balanced Analyst",
        instruction: "Provide a balanced view covering both technical and fundamental aspects.",
    },
    Persona {
        key: "2",
        name: "Value & Fundamental Specialist",
        instruction: "Focus heavily on Profitability (Margins, ROE), Valuation (P/E), and Analyst Target Prices. Evaluate the company's financial health and intrinsic value.",
    },
    Persona {
        key: "3",
        name: "Technical & Momentum Specialist",
        instruction: "Focus heavily on Price Action, RSI, Moving Averages, and Volatility (Beta). Identify key support/resistance areas and momentum shifts.",
    },
];

const INVESTORS: &[Persona] = &[
    Persona {
        key: "buffett",
        name: "Warren Buffett",
        instruction: "Value/Moat focus",
    },
    Persona {
        key: "wood",
        name: "Cathie Wood",
        instruction: "Innovation/Growth focus",
    },
    Persona {
        key: "burry",
        name: "Michael Burry",
        instruction: "Contrarian/Bubble skepticism",
    },
    Persona {
        key: "dalio",
        name: "Ray Dalio",
        instruction: "Macro/Cycle focus",
    },
    Persona {
        key: "lynch",
        name: "Peter Lynch",
        instruction: "GARP/Stock-picking focus",
    },
    Persona {
        key: "cramer",
        name: "Jim Cramer",
        instruction: "Momentum/Sentiment focus",
    },
];

pub fn catalogue(style: PromptStyle) -> &'static [Persona] {
    match style {
        PromptStyle::Expert => ANALYSTS,
        PromptStyle::Macro => INVESTORS,
    }
}

/// Exact key or case-insensitive full name.
pub fn find(style: PromptStyle, selector: &str) -> Option<&'static Persona> {
    let selector = selector.trim();
    catalogue(style)
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(selector) || p.name.eq_ignore_ascii_case(selector))
}

/// Like [`find`], but unknown or missing selectors fall back to the first persona.
pub fn resolve(style: PromptStyle, selector: Option<&str>) -> &'static Persona {
    let default = &catalogue(style)[0];
    match selector.filter(|s| !s.trim().is_empty()) {
        None => default,
        Some(s) => find(style, s).unwrap_or_else(|| {
            log::warn!("unknown persona {:?}, using {}", s, default.name);
            default
        }),
    }
}
