use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Importer configuration.
///
/// Loaded from an optional `config.toml` plus environment variables with the
/// `RECIPE_IMPORT__` prefix (double underscore for nesting, e.g.
/// `RECIPE_IMPORT__AI__API_KEY`). Everything has a sensible default; the AI
/// section is disabled unless explicitly turned on.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ImporterConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

/// HTTP fetch settings.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every request. Defaults to a desktop browser
    /// identity; several recipe sites refuse obvious bot agents.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Optional text-completion backend used as the low-confidence fallback.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Whether the fallback is available at all
    #[serde(default)]
    pub enabled: bool,
    /// API key (can also come from the OPENAI_API_KEY environment variable)
    pub api_key: Option<String>,
    /// Base URL for the API endpoint (custom or proxy endpoints)
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds for completion calls; a hung endpoint must
    /// not stall the whole batch
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            enabled: false,
            api_key: None,
            base_url: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_ai_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_ai_timeout_secs() -> u64 {
    30
}

impl ImporterConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_IMPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
