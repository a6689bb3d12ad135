//! 打开系统浏览器
//!
//! 只在用户显式要求时使用（`--open`），失败不影响命令结果。

use tracing::{debug, warn};

pub trait UrlOpener: Send + Sync {
    fn open_url(&self, url: &str) -> std::io::Result<()>;
}

/// 使用系统默认浏览器
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open_url(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

/// 打开链接，失败只记录警告
pub fn open_in_browser(opener: &dyn UrlOpener, url: &str) {
    match opener.open_url(url) {
        Ok(()) => debug!("已在浏览器中打开 {}", url),
        Err(e) => warn!("⚠️ 无法打开浏览器 ({}): {}", url, e),
    }
}
