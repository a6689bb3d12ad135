//! 抽奖扫描服务 - 业务能力层
//!
//! 只负责"找出还能参与的抽奖"，不关心参与流程
//!
//! 分页是游标式的，必须全部拉完再统一过滤：面板可能出现在任意一页，
//! 只看部分 HTML 会把"已参与"误判成"未参与"。

use crate::error::{ApiError, ScanError};
use crate::extraction;
use crate::infrastructure::{Pacer, SessionContext};
use crate::models::{PaginateResponse, RaffleId, RaffleLedger};
use std::time::Duration;
use tracing::{debug, error};

/// 抽奖列表页
pub const RAFFLES_INDEX_PATH: &str = "/raffles";
/// 分页接口
pub const PAGINATE_ENDPOINT: &str = "/ajax/raffles/Paginate";

/// 扫描参数
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// true 按剩余时间排序，false 按创建时间排序
    pub sort_by_time_left: bool,
    /// 两页之间的间隔
    pub paginate_delay: Duration,
    /// 分页失败后的重试间隔
    pub retry_delay: Duration,
}

impl ScanSettings {
    /// 站点的 sort 参数：0 = 剩余时间，1 = 创建时间
    fn sort_param(&self) -> &'static str {
        if self.sort_by_time_left {
            "0"
        } else {
            "1"
        }
    }
}

/// 抽奖扫描服务
///
/// 职责：
/// - 拉取列表页和全部分页
/// - 提取未参与面板中的抽奖 ID
/// - 按发现顺序重建待参与队列（排除已参与的 ID）
pub struct RaffleScanner<'a> {
    session: &'a SessionContext,
    pacer: &'a dyn Pacer,
    settings: ScanSettings,
}

impl<'a> RaffleScanner<'a> {
    pub fn new(session: &'a SessionContext, pacer: &'a dyn Pacer, settings: ScanSettings) -> Self {
        Self {
            session,
            pacer,
            settings,
        }
    }

    /// 执行一轮完整扫描
    ///
    /// # 返回
    /// 本轮待参与队列的快照（发现顺序）
    pub async fn scan(&self, ledger: &mut RaffleLedger) -> Result<Vec<RaffleId>, ScanError> {
        ledger.pending.clear();

        let mut html = self
            .session
            .get_text(RAFFLES_INDEX_PATH)
            .await
            .map_err(ScanError::IndexUnavailable)?;

        let pages = self.drain_pages(&mut html).await?;

        let candidates = extraction::open_panel_ids(&html);
        let found = candidates.len();
        for id in candidates {
            ledger.enqueue(id);
        }

        if ledger.pending.is_empty() {
            debug!("没有新的可参与抽奖");
        }

        debug!(
            "扫描完成: {} 页, {} 个未参与面板, 入队 {} 个",
            pages,
            found,
            ledger.pending.len()
        );

        Ok(ledger.pending.to_vec())
    }

    /// 沿游标拉取所有分页，按收到的顺序拼接到 `html`
    ///
    /// 瞬时失败（非 200、JSON 损坏、success=false）等待后用同一个游标重试；
    /// 只有封禁消息会中止扫描。
    async fn drain_pages(&self, html: &mut String) -> Result<usize, ScanError> {
        let mut cursor = String::new();
        let mut pages = 0;

        loop {
            let response = match self.fetch_page(&cursor).await {
                Ok(response) => response,
                Err(e) => {
                    error!(
                        "分页没有返回有效的 JSON 响应，{} 秒后重试: {}",
                        self.settings.retry_delay.as_secs(),
                        e
                    );
                    self.pacer.pause(self.settings.retry_delay).await;
                    continue;
                }
            };

            if !response.success {
                match response.message.as_deref() {
                    Some(message) if extraction::is_ban_message(message) => {
                        error!("账号已被封禁");
                        return Err(ScanError::AccountBanned {
                            message: message.to_string(),
                        });
                    }
                    Some(message) => {
                        error!(
                            "分页时出错: {} - 等待 {} 秒",
                            message,
                            self.settings.retry_delay.as_secs()
                        );
                    }
                    None => {
                        error!(
                            "游标 {} 的分页请求失败",
                            if cursor.is_empty() { "<empty>" } else { cursor.as_str() }
                        );
                    }
                }
                self.pacer.pause(self.settings.retry_delay).await;
                continue;
            }

            pages += 1;
            html.push_str(&response.html);
            cursor = response.last_id.unwrap_or_default();

            if response.done {
                return Ok(pages);
            }

            self.pacer.pause(self.settings.paginate_delay).await;
        }
    }

    async fn fetch_page(&self, cursor: &str) -> Result<PaginateResponse, ApiError> {
        let form = [
            ("start", cursor),
            ("sort", self.settings.sort_param()),
            ("puzzle", "0"),
        ];

        let reply = self.session.post_form(PAGINATE_ENDPOINT, &form, None).await?;
        if !reply.is_ok() {
            return Err(ApiError::BadStatus {
                endpoint: PAGINATE_ENDPOINT.to_string(),
                status: reply.status,
            });
        }

        serde_json::from_str(&reply.body).map_err(|e| ApiError::json_failed(PAGINATE_ENDPOINT, e))
    }
}
