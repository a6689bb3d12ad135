use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 认证相关错误
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 抽奖扫描错误
    #[error("扫描错误: {0}")]
    Scan(#[from] ScanError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 认证错误（启动阶段致命）
#[derive(Debug, Error)]
pub enum AuthError {
    /// 首页中找不到 CSRF token
    #[error("无法在首页中找到 CSRF token")]
    TokenNotFound,
    /// 首页无法获取
    #[error("无法获取首页: {0}")]
    TransportFailure(#[source] ApiError),
    /// 没有可用的 cookie
    #[error("找不到 cookie 文件 ({path})，请先执行 save-cookie 或使用 --cookie")]
    CookieMissing { path: String },
    /// cookie 值不合法
    #[error("cookie 无效: {reason}")]
    CookieInvalid { reason: String },
}

/// 扫描错误
#[derive(Debug, Error)]
pub enum ScanError {
    /// 账号被封禁，整个运行必须终止
    #[error("账号已被封禁: {message}")]
    AccountBanned { message: String },
    /// 抽奖列表页无法获取
    #[error("无法获取抽奖列表页: {0}")]
    IndexUnavailable(#[source] ApiError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 非 200 状态码
    #[error("API返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 请求头不合法（通常是 cookie 中含有非法字符）
    #[error("请求头不合法: {source}")]
    InvalidHeader {
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("无法读取配置文件 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建 JSON 解析失败错误
    pub fn json_failed(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ApiError {
    fn from(source: reqwest::header::InvalidHeaderValue) -> Self {
        ApiError::InvalidHeader { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banned_message_is_kept_verbatim() {
        let err = AppError::from(ScanError::AccountBanned {
            message: "You have an active site ban".to_string(),
        });
        assert!(err.to_string().contains("You have an active site ban"));
    }

    #[test]
    fn test_bad_status_names_endpoint() {
        let err = ApiError::BadStatus {
            endpoint: "/raffles".to_string(),
            status: 503,
        };
        let text = err.to_string();
        assert!(text.contains("/raffles"));
        assert!(text.contains("503"));
    }
}
