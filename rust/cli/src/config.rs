//! Layered configuration: built-in defaults, then an optional TOML file named
//! by `PAZAAK_CONFIG`, then `PAZAAK_*` environment variables. Every field
//! remembers which layer set it.

use serde::{Deserialize, Serialize};
use std::fs;

use pazaak_ai::AI_TYPES;

/// Longest accepted pause between computer turn stages.
pub const MAX_AI_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub ai_delay_ms: u64,
    pub data_dir: String,
    pub ai: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub ai_delay_ms: ValueSource,
    pub data_dir: ValueSource,
    pub ai: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            ai_delay_ms: ValueSource::Default,
            data_dir: ValueSource::Default,
            ai: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            ai_delay_ms: 400,
            data_dir: ".pazaak".into(),
            ai: "baseline".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value("PAZAAK_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.ai_delay_ms {
            cfg.ai_delay_ms = v;
            sources.ai_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.data_dir {
            cfg.data_dir = v;
            sources.data_dir = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("PAZAAK_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(delay) = env_value("PAZAAK_AI_DELAY_MS") {
        cfg.ai_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid AI delay '{}'", delay)))?;
        sources.ai_delay_ms = ValueSource::Env;
    }
    if let Some(dir) = env_value("PAZAAK_DATA_DIR") {
        cfg.data_dir = dir;
        sources.data_dir = ValueSource::Env;
    }
    if let Some(ai) = env_value("PAZAAK_AI") {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai_delay_ms: Option<u64>,
    #[serde(default)]
    data_dir: Option<String>,
    #[serde(default)]
    ai: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !AI_TYPES.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}' (expected one of: {})",
            cfg.ai,
            AI_TYPES.join(", ")
        )));
    }
    if cfg.ai_delay_ms > MAX_AI_DELAY_MS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: ai_delay_ms must be <= {}",
            MAX_AI_DELAY_MS
        )));
    }
    if cfg.data_dir.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: data_dir must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "PAZAAK_CONFIG",
        "PAZAAK_SEED",
        "PAZAAK_AI_DELAY_MS",
        "PAZAAK_DATA_DIR",
        "PAZAAK_AI",
    ];

    fn clear_env() {
        for key in VARS {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    fn set(key: &str, value: &str) {
        unsafe {
            std::env::set_var(key, value);
        }
    }

    #[test]
    #[serial]
    fn defaults_without_file_or_env() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.seed, ValueSource::Default);
        assert_eq!(resolved.sources.ai, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pazaak.toml");
        fs::write(&path, "seed = 456\nai_delay_ms = 0\ndata_dir = \"saves\"\n").unwrap();
        set("PAZAAK_CONFIG", path.to_str().unwrap());
        set("PAZAAK_SEED", "99");

        let resolved = load_with_sources().unwrap();
        clear_env();
        assert_eq!(resolved.config.seed, Some(99));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.ai_delay_ms, 0);
        assert_eq!(resolved.sources.ai_delay_ms, ValueSource::File);
        assert_eq!(resolved.config.data_dir, "saves");
        assert_eq!(resolved.sources.data_dir, ValueSource::File);
        assert_eq!(resolved.sources.ai, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn empty_env_values_are_ignored() {
        clear_env();
        set("PAZAAK_SEED", "");
        let cfg = load().unwrap();
        clear_env();
        assert_eq!(cfg.seed, None);
    }

    #[test]
    #[serial]
    fn rejects_bad_values() {
        clear_env();
        set("PAZAAK_SEED", "abc");
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();

        set("PAZAAK_AI", "grandmaster");
        let e = load().unwrap_err();
        assert!(e.to_string().contains("unknown ai"));
        clear_env();

        set("PAZAAK_AI_DELAY_MS", "10001");
        assert!(load().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn unknown_file_keys_are_a_parse_error() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pazaak.toml");
        fs::write(&path, "level = 3\n").unwrap();
        set("PAZAAK_CONFIG", path.to_str().unwrap());
        let result = load();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
