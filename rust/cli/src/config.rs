//! Layered CLI configuration: defaults, then a TOML file named by
//! `STOPPER_CONFIG`, then `STOPPER_*` environment variables. Each value
//! remembers which layer set it.

use serde::{Deserialize, Serialize};
use std::fs;

use stopper_engine::config::{DEAL_DELAY_MS, GameConfig, INITIAL_BANKROLL};
use stopper_engine::paytable::{DEFAULT_PAYTABLE_ID, Paytable};
use stopper_engine::settlement::{CountMatch, SideBetReturn, SideBetRules};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub paytable: String,
    pub advanced: bool,
    pub bankroll: u64,
    pub deal_delay_ms: u64,
    pub side_bet_return: SideBetReturn,
    pub count_match: CountMatch,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub paytable: ValueSource,
    pub advanced: ValueSource,
    pub bankroll: ValueSource,
    pub deal_delay_ms: ValueSource,
    pub side_bet_return: ValueSource,
    pub count_match: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            paytable: ValueSource::Default,
            advanced: ValueSource::Default,
            bankroll: ValueSource::Default,
            deal_delay_ms: ValueSource::Default,
            side_bet_return: ValueSource::Default,
            count_match: ValueSource::Default,
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
            paytable: DEFAULT_PAYTABLE_ID.into(),
            advanced: false,
            bankroll: INITIAL_BANKROLL,
            deal_delay_ms: DEAL_DELAY_MS,
            side_bet_return: SideBetReturn::default(),
            count_match: CountMatch::default(),
        }
    }
}

impl Config {
    /// Table configuration for a new session.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            paytable: self.paytable.clone(),
            advanced_mode: self.advanced,
            initial_bankroll: self.bankroll,
            deal_delay_ms: self.deal_delay_ms,
            side_bets: SideBetRules {
                stake_return: self.side_bet_return,
                count_match: self.count_match,
                ..SideBetRules::default()
            },
            ..GameConfig::default()
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

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("STOPPER_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.paytable {
            cfg.paytable = v;
            sources.paytable = ValueSource::File;
        }
        if let Some(v) = f.advanced {
            cfg.advanced = v;
            sources.advanced = ValueSource::File;
        }
        if let Some(v) = f.bankroll {
            cfg.bankroll = v;
            sources.bankroll = ValueSource::File;
        }
        if let Some(v) = f.deal_delay_ms {
            cfg.deal_delay_ms = v;
            sources.deal_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.side_bet_return {
            cfg.side_bet_return = v;
            sources.side_bet_return = ValueSource::File;
        }
        if let Some(v) = f.count_match {
            cfg.count_match = v;
            sources.count_match = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("STOPPER_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(id) = env_value("STOPPER_PAYTABLE") {
        cfg.paytable = id;
        sources.paytable = ValueSource::Env;
    }
    if let Some(adv) = env_value("STOPPER_ADVANCED") {
        cfg.advanced =
            parse_bool(&adv).ok_or_else(|| ConfigError::Invalid("Invalid advanced".into()))?;
        sources.advanced = ValueSource::Env;
    }
    if let Some(b) = env_value("STOPPER_BANKROLL") {
        cfg.bankroll = b
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bankroll".into()))?;
        sources.bankroll = ValueSource::Env;
    }
    if let Some(ms) = env_value("STOPPER_DEAL_DELAY_MS") {
        cfg.deal_delay_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid deal delay".into()))?;
        sources.deal_delay_ms = ValueSource::Env;
    }
    if let Some(mode) = env_value("STOPPER_SIDE_BET_RETURN") {
        cfg.side_bet_return = match mode.to_ascii_lowercase().as_str() {
            "stake-and-profit" => SideBetReturn::StakeAndProfit,
            "profit-only" => SideBetReturn::ProfitOnly,
            _ => return Err(ConfigError::Invalid("Invalid side bet return".into())),
        };
        sources.side_bet_return = ValueSource::Env;
    }
    if let Some(mode) = env_value("STOPPER_COUNT_MATCH") {
        cfg.count_match = match mode.to_ascii_lowercase().as_str() {
            "exact-at-max" => CountMatch::ExactAtMax,
            "range" => CountMatch::Range,
            _ => return Err(ConfigError::Invalid("Invalid count match".into())),
        };
        sources.count_match = ValueSource::Env;
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
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    paytable: Option<String>,
    #[serde(default)]
    advanced: Option<bool>,
    #[serde(default)]
    bankroll: Option<u64>,
    #[serde(default)]
    deal_delay_ms: Option<u64>,
    #[serde(default)]
    side_bet_return: Option<SideBetReturn>,
    #[serde(default)]
    count_match: Option<CountMatch>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if Paytable::by_id(&cfg.paytable).is_none() {
        return Err(ConfigError::Invalid(format!(
            "unknown paytable {}",
            cfg.paytable
        )));
    }
    if cfg.bankroll == 0 {
        return Err(ConfigError::Invalid("bankroll must be >0".into()));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
