//! 参与请求服务 - 业务能力层
//!
//! 只负责"提交一次参与请求并解读结果"

use crate::infrastructure::SessionContext;
use crate::models::{EnterRaffleResponse, RaffleId, RaffleOutcome};
use crate::utils::logging::truncate_text;
use tracing::debug;

/// 参与接口
pub const ENTER_ENDPOINT: &str = "/ajax/viewraffle/EnterRaffle";

/// 站点没有给出原因时使用的文本
pub const UNKNOWN_REASON: &str = "Unknown Reason";

pub struct EntrySubmitter<'a> {
    session: &'a SessionContext,
}

impl<'a> EntrySubmitter<'a> {
    pub fn new(session: &'a SessionContext) -> Self {
        Self { session }
    }

    /// 提交参与请求
    ///
    /// # 返回
    /// `Entered` 或 `SiteRejected(原因)`；网络错误和无法解析的响应也归为拒绝，
    /// 这样该抽奖会在下一轮重新评估。
    pub async fn submit(&self, raffle_id: &RaffleId, hash: &str) -> RaffleOutcome {
        let referer = self.session.absolute_url(&raffle_id.detail_path());
        let form = [
            ("raffle", raffle_id.as_str()),
            ("captcha", ""),
            ("hash", hash),
            ("flag", ""),
        ];

        let reply = match self
            .session
            .post_form(ENTER_ENDPOINT, &form, Some(&referer))
            .await
        {
            Ok(reply) => reply,
            Err(e) => return RaffleOutcome::SiteRejected(e.to_string()),
        };

        debug!(
            "参与响应 ({}): {}",
            reply.status,
            truncate_text(&reply.body, 200)
        );

        match serde_json::from_str::<EnterRaffleResponse>(&reply.body) {
            Ok(response) if response.success => RaffleOutcome::Entered,
            Ok(response) => RaffleOutcome::SiteRejected(
                response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| UNKNOWN_REASON.to_string()),
            ),
            Err(_) => RaffleOutcome::SiteRejected(UNKNOWN_REASON.to_string()),
        }
    }
}
