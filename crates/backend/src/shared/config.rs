use contracts::shared::link::UnlinkPolicy;
use contracts::shared::list_query::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub editing: EditingConfig,
}

/// List and feedback settings of the console pages
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub page_size: usize,
    /// How long a link confirmation stays visible
    pub feedback_ttl_secs: u64,
    /// Name written into audit blocks of records created from the console
    pub operator: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            feedback_ttl_secs: 3,
            operator: "admin".to_string(),
        }
    }
}

/// Edit form behavior
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EditingConfig {
    pub unlink_policy: UnlinkPolicy,
    /// Update the audit block and append a history entry on every save
    pub stamp_audit_on_save: bool,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[console]
page_size = 10
feedback_ttl_secs = 3
operator = "admin"

[editing]
unlink_policy = "keep_ancestors"
stamp_audit_on_save = false
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
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    if config.console.page_size == 0 {
        tracing::warn!("page_size = 0 is not usable, falling back to {}", DEFAULT_PAGE_SIZE);
        config.console.page_size = DEFAULT_PAGE_SIZE;
    }
    Ok(config)
}
