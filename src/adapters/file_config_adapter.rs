//! INI file configuration adapter.

use crate::domain::error::OllieError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OllieError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| OllieError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// No file: every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Some(true),
            "false" | "no" | "0" | "off" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .filter(|v| !v.trim().is_empty())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v.trim()))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[data]
history_range = 3mo
timeout_secs = 15

[technicals]
rsi_smoothing = wilder
change_lookback = 5

[prompt]
style = macro
persona = Warren Buffett

[history]
enabled = no
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("prompt", "persona"),
            Some("Warren Buffett".to_string())
        );
        assert_eq!(adapter.get_string("data", "history_range"), Some("3mo".into()));
        assert_eq!(adapter.get_int("data", "timeout_secs", 20), 15);
        assert!(!adapter.get_bool("history", "enabled", true));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let adapter = FileConfigAdapter::from_string("[news]\n").unwrap();
        assert_eq!(adapter.get_string("news", "fallback"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert_eq!(adapter.get_int("news", "limit", 5), 5);
        assert_eq!(adapter.get_double("news", "weight", 0.5), 0.5);
        assert!(adapter.get_bool("history", "enabled", true));
    }

    #[test]
    fn blank_value_is_absent() {
        let adapter = FileConfigAdapter::from_string("[prompt]\ntemplate_path =\n").unwrap();
        assert_eq!(adapter.get_string("prompt", "template_path"), None);
    }

    #[test]
    fn non_numeric_falls_back() {
        let adapter = FileConfigAdapter::from_string("[news]\nlimit = lots\n").unwrap();
        assert_eq!(adapter.get_int("news", "limit", 5), 5);
    }

    #[test]
    fn bool_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[x]\na = true\nb = on\nc = 0\nd = maybe\n").unwrap();
        assert!(adapter.get_bool("x", "a", false));
        assert!(adapter.get_bool("x", "b", false));
        assert!(!adapter.get_bool("x", "c", true));
        assert!(adapter.get_bool("x", "d", true));
    }

    #[test]
    fn empty_adapter_has_nothing() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("data", "data_dir"), None);
        assert_eq!(adapter.get_int("technicals", "ma_period", 20), 20);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[watchlist]\npath = /tmp/watchlist.txt\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("watchlist", "path"),
            Some("/tmp/watchlist.txt".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/ollie.ini");
        assert!(matches!(result, Err(OllieError::ConfigParse { .. })));
    }
}
