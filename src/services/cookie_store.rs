//! Cookie 存储服务 - 业务能力层
//!
//! 只负责"保存 / 读取 scr_session cookie"

use crate::error::{AppError, AuthError, FileError};
use tokio::fs;
use tracing::{debug, info};

/// 有效 cookie 的最小长度
pub const MIN_COOKIE_LEN: usize = 250;

/// Cookie 存储服务
pub struct CookieStore {
    path: String,
}

impl CookieStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 校验 cookie 值：只接受 cookie 的值本身
    pub fn validate(cookie: &str) -> Result<(), AuthError> {
        if cookie.len() < MIN_COOKIE_LEN {
            return Err(AuthError::CookieInvalid {
                reason: format!("长度不足 {} 个字符", MIN_COOKIE_LEN),
            });
        }
        if cookie.contains("scr_session") {
            return Err(AuthError::CookieInvalid {
                reason: "请只填写 cookie 的值，不要包含 scr_session=".to_string(),
            });
        }
        Ok(())
    }

    /// 校验后写入文件
    pub async fn save(&self, cookie: &str) -> Result<(), AppError> {
        let cookie = cookie.trim();
        Self::validate(cookie)?;

        fs::write(&self.path, cookie)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;

        info!("✓ 已保存 cookie: {}", self.path);
        Ok(())
    }

    /// 读取已保存的 cookie
    pub async fn load(&self) -> Result<String, AppError> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(AuthError::CookieMissing {
                path: self.path.clone(),
            }
            .into());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| FileError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;

        let cookie = content.trim().to_string();
        if cookie.is_empty() {
            return Err(AuthError::CookieMissing {
                path: self.path.clone(),
            }
            .into());
        }

        debug!("已读取 cookie 文件: {}", self.path);
        Ok(cookie)
    }

    /// 命令行给出的 cookie 优先，否则读取文件
    pub async fn resolve(&self, explicit: Option<&str>) -> Result<String, AppError> {
        match explicit.map(str::trim).filter(|c| !c.is_empty()) {
            Some(cookie) => Ok(cookie.to_string()),
            None => self.load().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn valid_cookie() -> String {
        "a".repeat(MIN_COOKIE_LEN)
    }

    fn store_in(dir: &tempfile::TempDir) -> CookieStore {
        CookieStore::new(dir.path().join("cookie.txt").to_string_lossy().to_string())
    }

    #[test]
    fn test_validate() {
        assert_ok!(CookieStore::validate(&valid_cookie()));
        assert!(CookieStore::validate("short").is_err());
        let prefixed = format!("scr_session={}", valid_cookie());
        assert!(matches!(
            CookieStore::validate(&prefixed),
            Err(AuthError::CookieInvalid { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_ok!(store.save(&format!("  {}\n", valid_cookie())).await);
        assert_eq!(store.load().await.unwrap(), valid_cookie());
    }

    #[tokio::test]
    async fn test_invalid_cookie_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.save("short").await.is_err());
        assert!(matches!(
            store.load().await,
            Err(AppError::Auth(AuthError::CookieMissing { .. }))
        ));
    }

    #[tokio::test]
    async fn test_explicit_cookie_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.resolve(Some(" override ")).await.unwrap(), "override");
        assert!(store.resolve(None).await.is_err());
    }
}
