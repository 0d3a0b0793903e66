use contracts::enums::rule_kind::RuleKind;
use contracts::enums::tie_break::TieBreak;
use contracts::system::settings::{RulesSettings, DEFAULT_BLOCKED_PRODUCT_MESSAGE};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RulesConfig {
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default = "RuleKind::all")]
    pub enabled_kinds: Vec<RuleKind>,
    #[serde(default = "default_blocked_product_message")]
    pub blocked_product_message: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            enabled_kinds: RuleKind::all(),
            blocked_product_message: default_blocked_product_message(),
        }
    }
}

fn default_blocked_product_message() -> String {
    DEFAULT_BLOCKED_PRODUCT_MESSAGE.to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    /// Загрузить демонстрационные правила и товары при старте
    #[serde(default)]
    pub sample_data: bool,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[rules]
tie_break = "most_recently_updated"
enabled_kinds = ["URSEC", "Blacklist", "Whitelist"]

[seed]
sample_data = true
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

impl Config {
    /// Адрес для прослушивания, "host:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Начальные настройки правил
    pub fn rules_settings(&self) -> anyhow::Result<RulesSettings> {
        let settings = RulesSettings {
            enabled_kinds: self.rules.enabled_kinds.clone(),
            tie_break: self.rules.tie_break,
            blocked_product_message: self.rules.blocked_product_message.clone(),
            ..RulesSettings::default()
        };
        settings
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid [rules] section in config.toml: {}", e))?;
        Ok(settings)
    }
}
