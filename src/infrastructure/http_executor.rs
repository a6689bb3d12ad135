//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端（带 cookie），只暴露"发请求"的能力

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// 一次 HTTP 响应的状态码和正文
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// 面向抽奖站点的传输能力
///
/// 路径均相对于固定的站点根地址。
#[async_trait]
pub trait RaffleTransport: Send + Sync {
    /// GET 请求，非 200 状态视为错误
    async fn get_text(&self, path: &str) -> Result<String, ApiError>;

    /// 表单 POST 请求，返回原始状态码和正文
    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        referer: Option<&str>,
    ) -> Result<HttpReply, ApiError>;
}

/// 基于 reqwest 的 HTTP 执行器
///
/// 职责：
/// - 持有带 `scr_session` cookie 的客户端
/// - 拼接站点根地址
/// - 不认识抽奖 / 分页
pub struct HttpExecutor {
    client: Client,
    origin: String,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    pub fn new(
        origin: &str,
        cookie: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        headers.insert(COOKIE, HeaderValue::from_str(&format!("scr_session={}", cookie))?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::request_failed(origin, e))?;

        debug!("已创建 HTTP 客户端: {}", origin);

        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }
}

#[async_trait]
impl RaffleTransport for HttpExecutor {
    async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        debug!("发送 GET 请求: {}", path);

        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(path, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::BadStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(path, e))
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        referer: Option<&str>,
    ) -> Result<HttpReply, ApiError> {
        debug!("发送 POST 请求: {}", path);

        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::request_failed(path, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(path, e))?;

        Ok(HttpReply { status, body })
    }
}
