//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::google_news_adapter::{self, GoogleNewsAdapter};
use crate::adapters::history_csv_adapter::CsvHistoryAdapter;
use crate::adapters::watchlist_file_adapter::WatchlistFileAdapter;
use crate::adapters::yahoo_adapter::{self, YahooAdapter};
use crate::domain::config_validation::validate_config;
use crate::domain::dataset::{assemble, AssemblyOptions, DataSources};
use crate::domain::error::OllieError;
use crate::domain::history::{PromptRecord, HISTORY_DISPLAY_LIMIT};
use crate::domain::history_range::HistoryRange;
use crate::domain::indicator::RsiSmoothing;
use crate::domain::news::DEFAULT_NEWS_LIMIT;
use crate::domain::persona::{self, Persona};
use crate::domain::prompt::{self, PromptContext, PromptStyle};
use crate::domain::technicals::TechnicalsConfig;
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;
use crate::ports::news_port::NewsPort;
use crate::ports::watchlist_port::WatchlistPort;

pub const DEFAULT_HISTORY_PATH: &str = "ollie_history.csv";
pub const DEFAULT_WATCHLIST_PATH: &str = "watchlist.txt";
pub const DEFAULT_TIMEOUT_SECS: i64 = 20;

#[derive(Parser, Debug)]
#[command(name = "ollie", about = "Expert prompt factory for stock analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an analysis prompt for a ticker
    Prompt {
        symbol: String,
        #[arg(short, long)]
        persona: Option<String>,
        /// expert or macro
        #[arg(long)]
        style: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory the prompt file is written to
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Read bars and fundamentals from CSV/INI files instead of Yahoo
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Print only, do not write the prompt file
        #[arg(long)]
        no_save: bool,
        #[arg(long)]
        no_history: bool,
    },
    /// List available personas
    Personas {
        #[arg(long)]
        style: Option<String>,
    },
    /// Show the watchlist
    Watchlist {
        #[command(subcommand)]
        action: Option<WatchlistAction>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show recent prompts
    History {
        #[arg(short, long, default_value_t = HISTORY_DISPLAY_LIMIT)]
        limit: usize,
        #[arg(long)]
        clear: bool,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    /// Add a symbol to the watchlist
    Add { symbol: String },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Prompt {
            symbol,
            persona,
            style,
            config,
            output,
            data_dir,
            no_save,
            no_history,
        } => run_prompt(PromptArgs {
            symbol: &symbol,
            persona: persona.as_deref(),
            style: style.as_deref(),
            config: config.as_ref(),
            output: output.as_ref(),
            data_dir: data_dir.as_ref(),
            save: !no_save,
            record_history: !no_history,
        }),
        Command::Personas { style } => run_personas(style.as_deref()),
        Command::Watchlist { action, config } => run_watchlist(action, config.as_ref()),
        Command::History {
            limit,
            clear,
            config,
        } => run_history(limit, clear, config.as_ref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// No path means every setting takes its default.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, OllieError> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> OllieError {
    OllieError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: reason.into(),
    }
}

fn positive(config: &dyn ConfigPort, section: &str, key: &str, default: usize) -> Result<usize, OllieError> {
    let value = config.get_int(section, key, default as i64);
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| invalid(section, key, format!("{} must be positive", key)))
}

pub fn build_technicals_config(config: &dyn ConfigPort) -> Result<TechnicalsConfig, OllieError> {
    let defaults = TechnicalsConfig::default();
    let rsi_smoothing = match config.get_string("technicals", "rsi_smoothing") {
        Some(s) => s
            .parse::<RsiSmoothing>()
            .map_err(|e| invalid("technicals", "rsi_smoothing", e))?,
        None => defaults.rsi_smoothing,
    };

    let technicals = TechnicalsConfig {
        ma_period: positive(config, "technicals", "ma_period", defaults.ma_period)?,
        rsi_period: positive(config, "technicals", "rsi_period", defaults.rsi_period)?,
        rsi_smoothing,
        macd_fast: positive(config, "technicals", "macd_fast", defaults.macd_fast)?,
        macd_slow: positive(config, "technicals", "macd_slow", defaults.macd_slow)?,
        macd_signal: positive(config, "technicals", "macd_signal", defaults.macd_signal)?,
        change_lookback: positive(config, "technicals", "change_lookback", defaults.change_lookback)?,
    };

    if technicals.macd_fast >= technicals.macd_slow {
        return Err(invalid(
            "technicals",
            "macd_fast",
            "macd_fast must be smaller than macd_slow",
        ));
    }
    if technicals.change_lookback < 2 {
        return Err(invalid(
            "technicals",
            "change_lookback",
            "change_lookback must be at least 2",
        ));
    }
    Ok(technicals)
}

pub fn build_assembly_options(
    config: &dyn ConfigPort,
    style: PromptStyle,
) -> Result<AssemblyOptions, OllieError> {
    let history_range = match config.get_string("data", "history_range") {
        Some(r) => r
            .parse::<HistoryRange>()
            .map_err(|e| invalid("data", "history_range", e))?,
        None => HistoryRange::default(),
    };

    Ok(AssemblyOptions {
        history_range,
        technicals: build_technicals_config(config)?,
        news_limit: positive(config, "news", "limit", DEFAULT_NEWS_LIMIT)?,
        include_macro: style.needs_macro_context(),
    })
}

/// `--style` wins over `[prompt] style`.
pub fn resolve_style(
    style_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<PromptStyle, OllieError> {
    match style_override.map(str::to_string).or_else(|| config.get_string("prompt", "style")) {
        Some(s) => s.parse::<PromptStyle>().map_err(|e| invalid("prompt", "style", e)),
        None => Ok(PromptStyle::default()),
    }
}

/// Custom template from `[prompt] template_path`, else the style's built-in one.
pub fn load_template(style: PromptStyle, config: &dyn ConfigPort) -> Result<String, OllieError> {
    match config.get_string("prompt", "template_path") {
        Some(path) => {
            let path = path.trim();
            eprintln!("Using template {}", path);
            fs::read_to_string(path).map_err(OllieError::from)
        }
        None => Ok(style.builtin_template().to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedPrompt {
    pub symbol: String,
    pub persona: &'static Persona,
    pub text: String,
}

pub fn generate_prompt(
    sources: &DataSources,
    config: &dyn ConfigPort,
    symbol: &str,
    persona_override: Option<&str>,
    style: PromptStyle,
) -> Result<GeneratedPrompt, OllieError> {
    let options = build_assembly_options(config, style)?;
    let template = load_template(style, config)?;

    let selector = persona_override
        .map(str::to_string)
        .or_else(|| config.get_string("prompt", "persona"));
    let persona = persona::resolve(style, selector.as_deref());

    let dataset = assemble(sources, symbol, &options)?;
    let text = prompt::resolve(
        &template,
        &PromptContext {
            dataset: &dataset,
            persona,
            technicals: &options.technicals,
        },
    );

    Ok(GeneratedPrompt {
        symbol: dataset.symbol,
        persona,
        text,
    })
}

pub fn prompt_file_path(output_dir: &Path, symbol: &str) -> PathBuf {
    output_dir.join(format!("{}_expert_prompt.txt", symbol))
}

pub fn write_prompt(output_dir: &Path, prompt: &GeneratedPrompt) -> Result<PathBuf, OllieError> {
    fs::create_dir_all(output_dir)?;
    let path = prompt_file_path(output_dir, &prompt.symbol);
    fs::write(&path, &prompt.text)?;
    Ok(path)
}

pub fn history_adapter(config: &dyn ConfigPort) -> CsvHistoryAdapter {
    let path = config
        .get_string("history", "path")
        .unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string());
    CsvHistoryAdapter::new(PathBuf::from(path.trim()))
}

pub fn watchlist_adapter(config: &dyn ConfigPort) -> WatchlistFileAdapter {
    let path = config
        .get_string("watchlist", "path")
        .unwrap_or_else(|| DEFAULT_WATCHLIST_PATH.to_string());
    WatchlistFileAdapter::new(PathBuf::from(path.trim()))
}

/// `[news] fallback`, `google` unless set to `none`.
pub fn fallback_enabled(config: &dyn ConfigPort) -> bool {
    config
        .get_string("news", "fallback")
        .map(|f| !f.trim().eq_ignore_ascii_case("none"))
        .unwrap_or(true)
}

struct PromptArgs<'a> {
    symbol: &'a str,
    persona: Option<&'a str>,
    style: Option<&'a str>,
    config: Option<&'a PathBuf>,
    output: Option<&'a PathBuf>,
    data_dir: Option<&'a PathBuf>,
    save: bool,
    record_history: bool,
}

fn run_prompt(args: PromptArgs) -> Result<(), OllieError> {
    let config = load_config(args.config)?;
    validate_config(&config)?;
    let style = resolve_style(args.style, &config)?;

    let data_dir = args
        .data_dir
        .cloned()
        .or_else(|| config.get_string("data", "data_dir").map(|d| PathBuf::from(d.trim())));

    let generated = match data_dir {
        Some(dir) => {
            eprintln!("Reading offline data from {}", dir.display());
            let offline = CsvAdapter::new(dir);
            let sources = DataSources {
                prices: &offline,
                profiles: &offline,
                news: Some(&offline),
                fallback_news: None,
            };
            generate_prompt(&sources, &config, args.symbol, args.persona, style)?
        }
        None => {
            let timeout = Duration::from_secs(
                config.get_int("data", "timeout_secs", DEFAULT_TIMEOUT_SECS).max(1) as u64,
            );
            let user_agent = config
                .get_string("data", "user_agent")
                .unwrap_or_else(|| yahoo_adapter::DEFAULT_USER_AGENT.to_string());
            let yahoo_url = config
                .get_string("data", "yahoo_base_url")
                .unwrap_or_else(|| yahoo_adapter::DEFAULT_BASE_URL.to_string());

            let yahoo = YahooAdapter::new(yahoo_url.trim(), timeout, &user_agent)?;
            let google = if fallback_enabled(&config) {
                let news_url = config
                    .get_string("data", "news_base_url")
                    .unwrap_or_else(|| google_news_adapter::DEFAULT_BASE_URL.to_string());
                Some(GoogleNewsAdapter::new(news_url.trim(), timeout, &user_agent)?)
            } else {
                None
            };

            eprintln!("Fetching market data for {}...", args.symbol.trim().to_uppercase());
            let sources = DataSources {
                prices: &yahoo,
                profiles: &yahoo,
                news: Some(&yahoo),
                fallback_news: google.as_ref().map(|g| g as &dyn NewsPort),
            };
            generate_prompt(&sources, &config, args.symbol, args.persona, style)?
        }
    };

    println!("{}", generated.text);

    if args.save {
        let output_dir = args
            .output
            .cloned()
            .or_else(|| config.get_string("prompt", "output_dir").map(|d| PathBuf::from(d.trim())))
            .unwrap_or_else(|| PathBuf::from("."));
        let path = write_prompt(&output_dir, &generated)?;
        eprintln!("Prompt written to {}", path.display());
    }

    if args.record_history && config.get_bool("history", "enabled", true) {
        let record = PromptRecord::new(&generated.symbol, generated.persona.name, &generated.text);
        if let Err(e) = history_adapter(&config).append(&record) {
            eprintln!("warning: could not record history ({})", e);
        }
    }

    Ok(())
}

pub fn format_personas(style: PromptStyle) -> String {
    let mut out = format!("{} personas:\n", style);
    for p in persona::catalogue(style) {
        out.push_str(&format!("  {:<8} {} ({})\n", p.key, p.name, p.instruction));
    }
    out
}

fn run_personas(style: Option<&str>) -> Result<(), OllieError> {
    let styles = match style {
        Some(s) => vec![s.parse::<PromptStyle>().map_err(|e| invalid("prompt", "style", e))?],
        None => vec![PromptStyle::Expert, PromptStyle::Macro],
    };
    for style in styles {
        print!("{}", format_personas(style));
    }
    Ok(())
}

fn run_watchlist(action: Option<WatchlistAction>, config_path: Option<&PathBuf>) -> Result<(), OllieError> {
    let config = load_config(config_path)?;
    let watchlist = watchlist_adapter(&config);

    if let Some(WatchlistAction::Add { symbol }) = action {
        if watchlist.add(&symbol)? {
            eprintln!("Added {}", symbol.trim().to_uppercase());
        } else {
            eprintln!("{} is already on the watchlist", symbol.trim().to_uppercase());
        }
    }

    for symbol in watchlist.load()? {
        println!("{}", symbol);
    }
    Ok(())
}

fn run_history(limit: usize, clear: bool, config_path: Option<&PathBuf>) -> Result<(), OllieError> {
    let config = load_config(config_path)?;
    let history = history_adapter(&config);

    if clear {
        history.clear()?;
        eprintln!("History cleared");
        return Ok(());
    }

    let records = history.recent(limit)?;
    if records.is_empty() {
        eprintln!("No prompts recorded yet");
    }
    for record in records {
        println!("=== {} ({})", record.heading(), record.persona);
        println!("{}\n", record.prompt);
    }
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), OllieError> {
    let config = load_config(Some(config_path))?;
    validate_config(&config)?;
    let style = resolve_style(None, &config)?;
    let options = build_assembly_options(&config, style)?;
    let persona = persona::resolve(style, config.get_string("prompt", "persona").as_deref());

    eprintln!("Config is valid");
    eprintln!("  Style:      {}", style);
    eprintln!("  Persona:    {}", persona.name);
    eprintln!("  Range:      {}", options.history_range);
    eprintln!(
        "  Indicators: SMA({}) RSI({}, {}) MACD({}/{}/{})",
        options.technicals.ma_period,
        options.technicals.rsi_period,
        options.technicals.rsi_smoothing,
        options.technicals.macd_fast,
        options.technicals.macd_slow,
        options.technicals.macd_signal
    );
    eprintln!("  News limit: {}", options.news_limit);
    Ok(())
}
