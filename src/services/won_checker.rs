//! 中奖检查服务 - 业务能力层

use crate::error::ApiError;
use crate::extraction;
use crate::infrastructure::{open_in_browser, SessionContext, UrlOpener};
use tracing::info;

/// 中奖列表页
pub const WON_RAFFLES_PATH: &str = "/raffles/won";

/// 查询首页提示的待领取中奖数量
pub async fn count_won_raffles(session: &SessionContext) -> Result<u32, ApiError> {
    let html = session.get_text("/").await?;
    Ok(extraction::won_raffle_count(&html))
}

/// 查询并输出结果
///
/// # 参数
/// - `opener`: 给出时，有待领取的抽奖就在浏览器中打开中奖列表页
pub async fn report_won_raffles(
    session: &SessionContext,
    opener: Option<&dyn UrlOpener>,
) -> Result<u32, ApiError> {
    let won = count_won_raffles(session).await?;

    if won == 0 {
        info!("没有需要领取的中奖抽奖");
        return Ok(0);
    }

    let url = session.absolute_url(WON_RAFFLES_PATH);
    info!("🎉 你赢得了 {} 个抽奖，需要领取", won);
    info!("👉 领取页面: {}", url);

    if let Some(opener) = opener {
        open_in_browser(opener, &url);
    }

    Ok(won)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{RecordingOpener, ScriptedTransport};
    use std::sync::Arc;

    fn session_with_home(html: &str) -> SessionContext {
        let transport = Arc::new(ScriptedTransport::new());
        transport.on_get("/", html);
        SessionContext::new(transport, "tok", "https://scrap.tf")
    }

    #[tokio::test]
    async fn test_count_won_raffles() {
        let session = session_with_home("<div>You've won 3 raffles that must be withdrawn</div>");

        assert_eq!(report_won_raffles(&session, None).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_no_won_banner() {
        let session = session_with_home("<div>Welcome back</div>");

        assert_eq!(count_won_raffles(&session).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_opens_won_page_when_raffles_won() {
        let session = session_with_home("<div>You've won 1 raffle that must be withdrawn</div>");
        let opener = RecordingOpener::new();

        let won = report_won_raffles(&session, Some(&opener)).await.unwrap();

        assert_eq!(won, 1);
        assert_eq!(opener.opened(), vec!["https://scrap.tf/raffles/won"]);
    }

    #[tokio::test]
    async fn test_nothing_opened_without_won_raffles() {
        let session = session_with_home("<div>Welcome back</div>");
        let opener = RecordingOpener::new();

        let won = report_won_raffles(&session, Some(&opener)).await.unwrap();

        assert_eq!(won, 0);
        assert!(opener.opened().is_empty());
    }
}
