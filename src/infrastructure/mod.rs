//! 基础设施层（Infrastructure）
//!
//! 持有稀缺资源（HTTP 客户端、会话、定时器、系统浏览器），只暴露能力，不认识业务流程。

pub mod browser;
pub mod http_executor;
pub mod pacer;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{open_in_browser, SystemBrowser, UrlOpener};
pub use http_executor::{HttpExecutor, HttpReply, RaffleTransport};
pub use pacer::{Pacer, TokioPacer};
pub use session::SessionContext;
