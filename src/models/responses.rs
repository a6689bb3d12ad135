//! 站点 JSON 响应模型

use serde::{Deserialize, Deserializer};

/// 分页接口响应
#[derive(Debug, Clone, Deserialize)]
pub struct PaginateResponse {
    pub success: bool,
    /// 站点在没有更多面板时可能返回 `null`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html: String,
    #[serde(default)]
    pub last_id: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 参与抽奖接口响应
#[derive(Debug, Clone, Deserialize)]
pub struct EnterRaffleResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub entered_message: Option<String>,
    #[serde(default)]
    pub can_comment: bool,
}

/// GitHub 最新发布信息
#[derive(Debug, Clone, Deserialize)]
pub struct LatestRelease {
    pub tag_name: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub html_url: String,
}
