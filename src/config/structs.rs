use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "ipfinder.toml";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: '{}'. Valid: text, json", s)),
        }
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - providers: 上游服务地址与超时
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值
    /// ENV 前缀：IPFINDER，分隔符：__
    /// 示例：IPFINDER__PROVIDERS__LOOKUP_TIMEOUT_SECS=20
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 IPFINDER，分隔符 __
            .add_source(
                Environment::with_prefix("IPFINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 上游服务配置
///
/// `primary_url` / `fallback_url` 使用 `{ip}` 作为占位符
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    #[serde(default = "default_ipv4_echo_url")]
    pub ipv4_echo_url: String,
    #[serde(default = "default_ipv6_echo_url")]
    pub ipv6_echo_url: String,
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    #[serde(default = "default_discovery_timeout_secs")]
    pub discovery_timeout_secs: u64,
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub file: Option<String>,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_ipv4_echo_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}

fn default_ipv6_echo_url() -> String {
    "https://api6.ipify.org?format=json".to_string()
}

fn default_primary_url() -> String {
    "https://ipapi.co/{ip}/json/".to_string()
}

fn default_fallback_url() -> String {
    "http://ip-api.com/json/{ip}".to_string()
}

fn default_discovery_timeout_secs() -> u64 {
    5
}

fn default_lookup_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("ipfinder/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ipv4_echo_url: default_ipv4_echo_url(),
            ipv6_echo_url: default_ipv6_echo_url(),
            primary_url: default_primary_url(),
            fallback_url: default_fallback_url(),
            discovery_timeout_secs: default_discovery_timeout_secs(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}
