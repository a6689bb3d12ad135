//! 会话上下文
//!
//! 持有传输句柄、CSRF token 和站点根地址。创建后在整个运行期间只读。

use crate::error::{ApiError, AuthError};
use crate::extraction;
use crate::infrastructure::http_executor::{HttpReply, RaffleTransport};
use std::sync::Arc;
use tracing::debug;

pub struct SessionContext {
    transport: Arc<dyn RaffleTransport>,
    csrf_token: String,
    origin: String,
}

impl SessionContext {
    /// 已有 token 时直接构造
    pub fn new(
        transport: Arc<dyn RaffleTransport>,
        csrf_token: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            csrf_token: csrf_token.into(),
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    /// 获取首页并提取 CSRF token
    pub async fn authenticate(
        transport: Arc<dyn RaffleTransport>,
        origin: impl Into<String>,
    ) -> Result<Self, AuthError> {
        debug!("正在获取 CSRF token");

        let html = transport
            .get_text("/")
            .await
            .map_err(AuthError::TransportFailure)?;

        let token = extraction::csrf_token(&html).ok_or(AuthError::TokenNotFound)?;

        debug!("已获取 CSRF token");

        Ok(Self::new(transport, token, origin))
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// 站点内路径对应的完整地址
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        self.transport.get_text(path).await
    }

    /// 提交表单，自动附加 csrf 字段
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        referer: Option<&str>,
    ) -> Result<HttpReply, ApiError> {
        let mut form: Vec<(&str, &str)> = fields.to_vec();
        form.push(("csrf", self.csrf_token.as_str()));
        self.transport.post_form(path, &form, referer).await
    }
}
