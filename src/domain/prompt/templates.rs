//! Built-in prompt templates with `{{PLACEHOLDER}}` substitution.

/// Single-stock deep dive: price action, fundamentals and analyst context.
pub const EXPERT_TEMPLATE: &str = r#"You are a {{PERSONA_NAME}}. Your goal is: {{PERSONA_INSTRUCTION}}

### 📊 DATASET FOR {{SYMBOL}} ###

### 1. Market Price Action:
- Latest Close Price: {{LATEST_CLOSE}} (as of {{AS_OF}})
- Weekly Change: {{CHANGE_PCT}}
- {{MA_PERIOD}}-Day Moving Average (MA{{MA_PERIOD}}): {{MA_VALUE}}
- RSI ({{RSI_PERIOD}}-Day): {{RSI_VALUE}}
- MACD ({{MACD_PARAMS}}): {{MACD}}
- Volume: {{VOLUME}}
- Beta (Volatility): {{BETA}}

### 2. Fundamental & Profitability Metrics:
- Market Cap: {{MARKET_CAP}}
- Forward P/E Ratio: {{FORWARD_PE}}
- Gross Margins: {{GROSS_MARGINS}}
- Return on Equity (ROE): {{ROE}}
- Free Cash Flow: {{FREE_CASHFLOW}}
- 52-Week Range: {{WEEK52_LOW}} - {{WEEK52_HIGH}}

### 3. Institutional Context & News:
- Analyst Target Price (Mean): {{TARGET_PRICE}}
- Analyst Recommendation: {{RECOMMENDATION}}

- Recent News Catalysts:
{{NEWS}}

---
### ANALYSIS TASK ###
Based on your expertise as a {{PERSONA_NAME}}, please provide a professional analysis.
1. Synthesize the provided data points.
2. Is the stock trading at a discount or premium relative to analyst targets and its 52-week range?
3. What do the current Technicals (RSI/MA/MACD) suggest versus the Fundamentals (Margins/P/E)?
4. Provide 3 high-conviction "Buy Reasons" and 3 "Key Risks".
5. Give a final outlook for the next 5-10 trading days.
"#;

/// Macro-aware prompt voiced by a well-known investor.
pub const MACRO_TEMPLATE: &str = r#"You are {{PERSONA_NAME}}. Your objective is: {{PERSONA_INSTRUCTION}}

### 🌐 GLOBAL & MACRO CONTEXT ###
- VIX Index: {{VIX}} (Volatility check)
- 10Y Yield: {{TEN_YEAR_YIELD}} (Interest rate pressure)
- SPY Weekly: {{SPY_CHANGE}} (Market Benchmark)

### 📊 DATASET FOR {{SYMBOL}} ###

### 1. Smart Money & Sentiment:
- **Insider Activity (Recent)**:
{{INSIDER_ACTIVITY}}
- **Short Ratio**: {{SHORT_RATIO}} (Note: Above 5-10 indicates high bearish interest or squeeze potential)

### 2. Market & Sector Performance:
- Latest Close Price: {{LATEST_CLOSE}} (as of {{AS_OF}})
- Weekly Change: {{CHANGE_PCT}}
- Sector: {{SECTOR}}
- {{MA_PERIOD}}-Day Moving Average (MA{{MA_PERIOD}}): {{MA_VALUE}}
- RSI ({{RSI_PERIOD}}-Day): {{RSI_VALUE}}
- MACD ({{MACD_PARAMS}}): {{MACD}}

### 3. Fundamental & Institutional Metrics:
- Forward P/E Ratio: {{FORWARD_PE}}
- Analyst Target Price (Mean): {{TARGET_PRICE}}
- Analyst Recommendation: {{RECOMMENDATION}}
- **NEXT EARNINGS DATE**: {{NEXT_EARNINGS}}

### 4. Recent News Catalysts:
{{NEWS}}

---
### ANALYSIS TASK ###
Based on your unique expertise as {{PERSONA_NAME}}, please provide:
1. **Smart Money Check**: What does the Insider Activity and Short Ratio tell you about the current sentiment?
2. **Technical vs Fundamental**: Contrast the chart momentum (MA{{MA_PERIOD}}/RSI/MACD) with its valuation and analyst targets.
3. **Macro/Event Synthesis**: Factor in VIX, 10Y Yield, and the upcoming Earnings Date.
4. Provide 3 specific Buy Reasons and 3 specific Risks.
5. Final Short-Term Outlook (5-10 days).
"#;
