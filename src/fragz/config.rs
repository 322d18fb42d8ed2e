use crate::display::DEFAULT_DISPLAY_WIDTH;
use crate::error::{FragzError, Result};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::splitter::SplitMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TARGET: i64 = 100;
const DEFAULT_TOLERANCE: i64 = 20;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MIN_DISPLAY_WIDTH: usize = 4;

/// Keys accepted by [`FragzConfig::get`] and [`FragzConfig::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "items-per-page",
    "display-width",
    "default-mode",
    "default-target",
    "default-tolerance",
    "fragmenter.program",
    "fragmenter.args",
    "fragmenter.timeout-secs",
];

/// Configuration for fragz, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FragzConfig {
    /// Fragments shown per page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Maximum length (in characters) of a fragment's display name
    #[serde(default = "default_display_width")]
    pub display_width: usize,

    #[serde(default = "default_mode")]
    pub default_mode: String,

    #[serde(default = "default_target")]
    pub default_target: i64,

    #[serde(default = "default_tolerance")]
    pub default_tolerance: i64,

    #[serde(default)]
    pub fragmenter: FragmenterConfig,
}

/// How to start the fragmentation process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FragmenterConfig {
    /// Executable to run. When unset, fragz runs its own `split-worker`.
    #[serde(default)]
    pub program: Option<PathBuf>,

    /// Arguments placed before `<mode> <target> <tolerance>`
    #[serde(default)]
    pub args: Vec<String>,

    /// Per-invocation timeout; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_display_width() -> usize {
    DEFAULT_DISPLAY_WIDTH
}

fn default_mode() -> String {
    SplitMode::Size.to_string()
}

fn default_target() -> i64 {
    DEFAULT_TARGET
}

fn default_tolerance() -> i64 {
    DEFAULT_TOLERANCE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for FragmenterConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for FragzConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            display_width: DEFAULT_DISPLAY_WIDTH,
            default_mode: default_mode(),
            default_target: DEFAULT_TARGET,
            default_tolerance: DEFAULT_TOLERANCE,
            fragmenter: FragmenterConfig::default(),
        }
    }
}

impl FragzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: FragzConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 {
            return Err(FragzError::Config("items_per_page must be at least 1".into()));
        }
        if self.display_width < MIN_DISPLAY_WIDTH {
            return Err(FragzError::Config(format!(
                "display_width must be at least {}",
                MIN_DISPLAY_WIDTH
            )));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "items-per-page" => self.items_per_page.to_string(),
            "display-width" => self.display_width.to_string(),
            "default-mode" => self.default_mode.clone(),
            "default-target" => self.default_target.to_string(),
            "default-tolerance" => self.default_tolerance.to_string(),
            "fragmenter.program" => self
                .fragmenter
                .program
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string()),
            "fragmenter.args" => self.fragmenter.args.join(" "),
            "fragmenter.timeout-secs" => self.fragmenter.timeout_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Sets a key from its string form. Returns a user-facing message on bad input.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "items-per-page" => {
                let n = parse_number::<usize>(key, value)?;
                if n == 0 {
                    return Err("items-per-page must be at least 1".to_string());
                }
                self.items_per_page = n;
            }
            "display-width" => {
                let n = parse_number::<usize>(key, value)?;
                if n < MIN_DISPLAY_WIDTH {
                    return Err(format!(
                        "display-width must be at least {}",
                        MIN_DISPLAY_WIDTH
                    ));
                }
                self.display_width = n;
            }
            "default-mode" => {
                if value.trim().is_empty() {
                    return Err("default-mode cannot be empty".to_string());
                }
                self.default_mode = value.trim().to_string();
            }
            "default-target" => self.default_target = parse_number(key, value)?,
            "default-tolerance" => self.default_tolerance = parse_number(key, value)?,
            "fragmenter.program" => {
                self.fragmenter.program = match value.trim() {
                    "" | "builtin" | "(built-in)" => None,
                    p => Some(PathBuf::from(p)),
                };
            }
            "fragmenter.args" => {
                self.fragmenter.args = value.split_whitespace().map(String::from).collect();
            }
            "fragmenter.timeout-secs" => self.fragmenter.timeout_secs = parse_number(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> std::result::Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FragzConfig::default();
        assert_eq!(config.items_per_page, 100);
        assert_eq!(config.display_width, 15);
        assert_eq!(config.default_mode, "size");
        assert_eq!(config.fragmenter.program, None);
        assert_eq!(config.fragmenter.timeout_secs, 60);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = FragzConfig::load(temp.path()).unwrap();
        assert_eq!(config, FragzConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");

        let mut config = FragzConfig::default();
        config.set("items-per-page", "25").unwrap();
        config.set("fragmenter.program", "/usr/bin/splitter").unwrap();
        config.set("fragmenter.args", "--fast  --json").unwrap();
        config.save(&dir).unwrap();

        let loaded = FragzConfig::load(&dir).unwrap();
        assert_eq!(loaded.items_per_page, 25);
        assert_eq!(
            loaded.fragmenter.program,
            Some(PathBuf::from("/usr/bin/splitter"))
        );
        assert_eq!(loaded.fragmenter.args, vec!["--fast", "--json"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"items_per_page": 7}"#).unwrap();

        let config = FragzConfig::load(temp.path()).unwrap();
        assert_eq!(config.items_per_page, 7);
        assert_eq!(config.default_target, 100);
        assert_eq!(config.fragmenter, FragmenterConfig::default());
    }

    #[test]
    fn test_invalid_file_values_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"items_per_page": 0}"#).unwrap();
        assert!(matches!(
            FragzConfig::load(temp.path()),
            Err(FragzError::Config(_))
        ));
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = FragzConfig::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "{} should be readable", key);
        }
        assert_eq!(config.get("fragmenter.program").unwrap(), "(built-in)");
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = FragzConfig::default();
        assert!(config.set("items-per-page", "0").is_err());
        assert!(config.set("items-per-page", "many").is_err());
        assert!(config.set("display-width", "3").is_err());
        assert!(config.set("unknown", "1").is_err());
        assert_eq!(config, FragzConfig::default());

        config.set("default-tolerance", "-5").unwrap();
        assert_eq!(config.default_tolerance, -5);
        config.set("fragmenter.program", "builtin").unwrap();
        assert_eq!(config.fragmenter.program, None);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut config = FragzConfig::default();
        config.set("default-mode", "row").unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: FragzConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
