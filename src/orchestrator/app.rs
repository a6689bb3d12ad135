//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 持有配置，按子命令组装资源并执行：
//!
//! 1. **加载 cookie**：命令行参数优先，否则读取已保存的文件
//! 2. **创建传输层**：`HttpExecutor`（带 cookie 和 UA 的 reqwest 客户端）
//! 3. **认证**：获取首页并提取 CSRF token，得到 `SessionContext`
//! 4. **执行命令**：主循环 / 中奖检查 / 保存 cookie / 更新检查
//!
//! 资源（会话、传输层）只在本模块创建，下层只借用。

use crate::cli::{Command, JoinArgs};
use crate::config::{Config, JoinOptions};
use crate::error::ScanError;
use crate::infrastructure::{HttpExecutor, SessionContext, SystemBrowser, TokioPacer, UrlOpener};
use crate::orchestrator::join_loop::{JoinLoop, RunReport};
use crate::services::{won_checker, CookieStore, UpdateChecker};
use crate::utils::logging;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

/// 应用主结构
pub struct App {
    config: Config,
    cookies: CookieStore,
}

impl App {
    pub fn new(config: Config) -> Self {
        let cookies = CookieStore::new(config.cookie_file.clone());
        Self { config, cookies }
    }

    /// 执行子命令
    pub async fn execute(&self, command: Command) -> Result<()> {
        match command {
            Command::JoinRaffles(args) => self.join_raffles(&args).await.map(|_| ()),
            Command::CheckWon(args) => self
                .check_won(args.cookie.cookie.as_deref(), args.open)
                .await
                .map(|_| ()),
            Command::SaveCookie { cookie } => self.save_cookie(&cookie).await,
            Command::CheckUpdates { open } => {
                self.check_updates(open).await?;
                Ok(())
            }
        }
    }

    /// 扫描并参与抽奖，直到次数用完或遇到封禁
    pub async fn join_raffles(&self, args: &JoinArgs) -> Result<RunReport> {
        let options = JoinOptions::from(args);
        let session = self.open_session(args.cookie.cookie.as_deref()).await?;
        let pacer = TokioPacer;

        let mut join_loop = JoinLoop::new(&session, &pacer, &self.config, &options);
        match join_loop.run().await {
            Ok(report) => {
                logging::print_final_stats(&report);
                Ok(report)
            }
            Err(e @ ScanError::AccountBanned { .. }) => {
                error!("🚫 账号已被封禁，停止运行");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 检查需要领取的中奖抽奖数量，`open` 时在浏览器中打开中奖列表页
    pub async fn check_won(&self, cookie: Option<&str>, open: bool) -> Result<u32> {
        let session = self.open_session(cookie).await?;
        let count = won_checker::report_won_raffles(&session, browser(open))
            .await
            .context("检查中奖抽奖失败")?;
        Ok(count)
    }

    /// 校验并保存 cookie
    pub async fn save_cookie(&self, cookie: &str) -> Result<()> {
        self.cookies.save(cookie).await?;
        info!("💾 cookie 已保存到 {}", self.cookies.path());
        Ok(())
    }

    /// 检查新版本，失败只记录日志
    pub async fn check_updates(&self, open: bool) -> Result<bool> {
        let checker = UpdateChecker::new(&self.config).context("创建更新检查客户端失败")?;
        Ok(checker.check(browser(open)).await)
    }

    /// 加载 cookie、创建传输层并认证
    async fn open_session(&self, cookie: Option<&str>) -> Result<SessionContext> {
        let cookie = self.cookies.resolve(cookie).await?;

        let executor = HttpExecutor::new(
            &self.config.base_url,
            &cookie,
            &self.config.user_agent,
            self.config.request_timeout(),
        )
        .context("创建 HTTP 客户端失败")?;
        let origin = executor.origin().to_string();

        let session = SessionContext::authenticate(Arc::new(executor), origin).await?;
        info!("🔐 已登录 {}", session.origin());
        Ok(session)
    }
}

fn browser(open: bool) -> Option<&'static dyn UrlOpener> {
    static SYSTEM_BROWSER: SystemBrowser = SystemBrowser;
    open.then_some(&SYSTEM_BROWSER as &dyn UrlOpener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CookieArg;
    use crate::services::cookie_store::MIN_COOKIE_LEN;
    use tempfile::tempdir;

    fn app_with_cookie_file(path: &std::path::Path) -> App {
        App::new(Config {
            cookie_file: path.to_string_lossy().into_owned(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_save_cookie_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookie.txt");
        let app = app_with_cookie_file(&path);
        let cookie = "a".repeat(MIN_COOKIE_LEN);

        app.save_cookie(&cookie).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), cookie);
    }

    #[tokio::test]
    async fn test_save_cookie_rejects_short_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookie.txt");
        let app = app_with_cookie_file(&path);

        assert!(app.save_cookie("short").await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_join_without_cookie_fails_before_network() {
        let dir = tempdir().unwrap();
        let app = App::new(Config {
            cookie_file: dir.path().join("missing.txt").to_string_lossy().into_owned(),
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        });
        let args = JoinArgs {
            cookie: CookieArg { cookie: None },
            repeat: 1,
            ending: false,
            increment_scan_delay: false,
            paranoid: false,
        };

        let err = app.join_raffles(&args).await.unwrap_err();

        assert!(err.to_string().contains("cookie"), "{}", err);
    }
}
