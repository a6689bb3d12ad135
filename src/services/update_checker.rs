//! 更新检查服务 - 业务能力层
//!
//! 独立的 HTTP 客户端（不带会话 cookie），失败只记录日志

use crate::config::Config;
use crate::error::ApiError;
use crate::infrastructure::{open_in_browser, UrlOpener};
use crate::models::LatestRelease;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::cmp::Ordering;
use tracing::{error, info};

/// 当前版本
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct UpdateChecker {
    client: Client,
    url: String,
    user_agent: String,
}

impl UpdateChecker {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::request_failed(&config.update_check_url, e))?;

        Ok(Self {
            client,
            url: config.update_check_url.clone(),
            user_agent: config.update_user_agent.clone(),
        })
    }

    /// 获取最新发布信息
    pub async fn latest_release(&self) -> Result<LatestRelease, ApiError> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(&self.url, e))?;

        if !response.status().is_success() {
            return Err(ApiError::BadStatus {
                endpoint: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(&self.url, e))?;

        serde_json::from_str(&body).map_err(|e| ApiError::json_failed(&self.url, e))
    }

    /// 检查并输出结果，返回是否有新版本
    ///
    /// # 参数
    /// - `opener`: 给出时，有新版本就在浏览器中打开发布页
    pub async fn check(&self, opener: Option<&dyn UrlOpener>) -> bool {
        info!("正在检查更新...");

        match self.latest_release().await {
            Ok(release) => report_release(CURRENT_VERSION, &release, opener),
            Err(e) => {
                error!("无法检查更新: {}", e);
                false
            }
        }
    }
}

/// 与当前版本比较并输出发布说明，返回远端是否更新
pub fn report_release(
    current: &str,
    release: &LatestRelease,
    opener: Option<&dyn UrlOpener>,
) -> bool {
    if compare_versions(current, &release.tag_name) != Ordering::Less {
        info!("✓ 当前已是最新版本 ({})", current);
        return false;
    }

    info!("🆕 有新版本可以下载: {}", release.tag_name);
    for line in release.body.lines() {
        info!("{}", line);
    }

    if !release.html_url.is_empty() {
        info!("下载地址: {}", release.html_url);
        if let Some(opener) = opener {
            open_in_browser(opener, &release.html_url);
        }
    }
    true
}

/// 按数字分段比较版本号，忽略前缀 `v`，缺少的分段视为 0
pub fn compare_versions(current: &str, remote: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.trim()
            .trim_start_matches(['v', 'V'])
            .split('.')
            .map(|part| {
                part.chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<String>()
                    .parse()
                    .unwrap_or(0)
            })
            .collect()
    };

    let (a, b) = (parse(current), parse(remote));
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
