use blackjack_engine::table::MIN_PLAYERS;
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment variable naming the TOML configuration file
pub const CONFIG_ENV: &str = "BLACKJACK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// 0 means an infinite deck
    pub decks: u32,
    /// Gamblers plus the dealer
    pub players: usize,
    pub seed: Option<u64>,
    pub episodes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub decks: ValueSource,
    pub players: ValueSource,
    pub seed: ValueSource,
    pub episodes: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            decks: ValueSource::Default,
            players: ValueSource::Default,
            seed: ValueSource::Default,
            episodes: ValueSource::Default,
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
            decks: 0,
            players: 2,
            seed: None,
            episodes: 1000,
        }
    }
}

/// Values given on the command line. `None` leaves the layered value alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub decks: Option<u32>,
    pub players: Option<usize>,
    pub seed: Option<u64>,
    pub episodes: Option<u64>,
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
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Defaults, then the file named by `BLACKJACK_CONFIG`, then `BLACKJACK_*`
/// environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let resolved = load_layers()?;
    validate(&resolved.config)?;
    Ok(resolved)
}

/// [`load_with_sources`] with command-line values applied on top. Only the
/// final combination is validated.
pub fn resolve(overrides: Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut resolved = load_layers()?;
    apply(&mut resolved, overrides);
    validate(&resolved.config)?;
    Ok(resolved)
}

fn load_layers() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.episodes {
            cfg.episodes = v;
            sources.episodes = ValueSource::File;
        }
    }

    if let Some(v) = env_value("BLACKJACK_DECKS", "decks")? {
        cfg.decks = v;
        sources.decks = ValueSource::Env;
    }
    if let Some(v) = env_value("BLACKJACK_PLAYERS", "players")? {
        cfg.players = v;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = env_value("BLACKJACK_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("BLACKJACK_EPISODES", "episodes")? {
        cfg.episodes = v;
        sources.episodes = ValueSource::Env;
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn apply(resolved: &mut ConfigResolved, overrides: Overrides) {
    let ConfigResolved { config, sources } = resolved;
    if let Some(v) = overrides.decks {
        config.decks = v;
        sources.decks = ValueSource::Cli;
    }
    if let Some(v) = overrides.players {
        config.players = v;
        sources.players = ValueSource::Cli;
    }
    if let Some(v) = overrides.seed {
        config.seed = Some(v);
        sources.seed = ValueSource::Cli;
    }
    if let Some(v) = overrides.episodes {
        config.episodes = v;
        sources.episodes = ValueSource::Cli;
    }
}

fn env_value<T: std::str::FromStr>(key: &str, name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", name, v))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    decks: Option<u32>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    episodes: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.players < MIN_PLAYERS {
        return Err(ConfigError::Invalid(format!(
            "players must be >= {}",
            MIN_PLAYERS
        )));
    }
    if cfg.episodes == 0 {
        return Err(ConfigError::Invalid("episodes must be >= 1".into()));
    }
    Ok(())
}
