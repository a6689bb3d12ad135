use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "raffle_runner.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 抽奖站点根地址
    pub base_url: String,
    /// 模拟浏览器的 User-Agent
    pub user_agent: String,
    /// cookie 保存路径
    pub cookie_file: String,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 节奏控制（毫秒） ---
    pub initial_scan_delay_ms: u64,
    pub scan_delay_step_ms: u64,
    pub join_delay_ms: u64,
    pub paginate_delay_ms: u64,
    pub retry_delay_ms: u64,
    // --- 更新检查 ---
    pub update_check_url: String,
    pub update_user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://scrap.tf".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/103.0.0.0 Safari/537.36".to_string(),
            cookie_file: "scr_session.txt".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
            initial_scan_delay_ms: 5_000,
            scan_delay_step_ms: 1_000,
            join_delay_ms: 4_000,
            paginate_delay_ms: 500,
            retry_delay_ms: 10_000,
            update_check_url: "https://api.github.com/repos/depthbomb/RaffleRunner/releases/latest".to_string(),
            update_user_agent: "RaffleRunner - depthbomb/RaffleRunner".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("RAFFLE_RUNNER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };
        base.with_env_overrides()
    }

    /// 从 TOML 文件读取，缺失的字段使用默认值
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    /// 使用环境变量覆盖现有配置
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: std::env::var("BASE_URL").unwrap_or(self.base_url),
            user_agent: std::env::var("USER_AGENT").unwrap_or(self.user_agent),
            cookie_file: std::env::var("COOKIE_FILE").unwrap_or(self.cookie_file),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", self.request_timeout_secs)?,
            verbose_logging: env_parse("VERBOSE_LOGGING", self.verbose_logging)?,
            initial_scan_delay_ms: env_parse("INITIAL_SCAN_DELAY_MS", self.initial_scan_delay_ms)?,
            scan_delay_step_ms: env_parse("SCAN_DELAY_STEP_MS", self.scan_delay_step_ms)?,
            join_delay_ms: env_parse("JOIN_DELAY_MS", self.join_delay_ms)?,
            paginate_delay_ms: env_parse("PAGINATE_DELAY_MS", self.paginate_delay_ms)?,
            retry_delay_ms: env_parse("RETRY_DELAY_MS", self.retry_delay_ms)?,
            update_check_url: std::env::var("UPDATE_CHECK_URL").unwrap_or(self.update_check_url),
            update_user_agent: std::env::var("UPDATE_USER_AGENT").unwrap_or(self.update_user_agent),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn join_delay(&self) -> Duration {
        Duration::from_millis(self.join_delay_ms)
    }

    pub fn paginate_delay(&self) -> Duration {
        Duration::from_millis(self.paginate_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// join-raffles 子命令的运行选项
#[derive(Clone, Debug, Default)]
pub struct JoinOptions {
    /// 扫描次数，<= 0 表示无限循环
    pub repeat: i64,
    /// 按剩余时间排序（否则按创建时间）
    pub sort_by_time_left: bool,
    /// 空扫描后递增扫描间隔
    pub increment_scan_delay: bool,
    /// 跳过参与人数过少、可能是陷阱的抽奖
    pub paranoid: bool,
}

impl JoinOptions {
    /// 有次数限制时返回上限
    pub fn cycle_limit(&self) -> Option<u64> {
        if self.repeat < 1 {
            None
        } else {
            Some(self.repeat as u64)
        }
    }
}

fn env_parse<T: std::str::FromStr>(var_name: &str, fallback: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                expected_type: std::any::type_name::<T>().to_string(),
                value,
            })
        }
        Err(_) => Ok(fallback),
    }
}
