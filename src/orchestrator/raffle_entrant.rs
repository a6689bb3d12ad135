//! 抽奖参与器 - 编排层
//!
//! ## 职责
//!
//! 按队列顺序逐个处理抽奖（严格串行，不并发提交），
//! 根据每个结果更新已参与集合并统计数量。
//!
//! | 结果 | 记入已参与 | 扣除总数 |
//! |------|-----------|---------|
//! | Entered | ✓ | |
//! | AlreadyEnded / Full | ✓ | ✓ |
//! | TooFewEntries | | ✓ |
//! | HashMissing | ✓ | |
//! | SiteRejected | | |

use crate::models::{JoinedSet, RaffleId, RaffleOutcome};
use crate::workflow::{RaffleCtx, RaffleFlow};
use tracing::info;

/// 一轮参与的统计
#[derive(Debug, Default, Clone)]
pub struct EntrySummary {
    pub entered: usize,
    pub total: usize,
    /// 按处理顺序记录的每个抽奖的结果
    pub outcomes: Vec<(RaffleId, RaffleOutcome)>,
}

pub struct RaffleEntrant<'a> {
    flow: RaffleFlow<'a>,
}

impl<'a> RaffleEntrant<'a> {
    pub fn new(flow: RaffleFlow<'a>) -> Self {
        Self { flow }
    }

    /// 处理整个队列
    ///
    /// # 参数
    /// - `queue`: 本轮待参与队列（发现顺序）
    /// - `joined`: 已参与集合，处理过程中会被更新
    pub async fn enter_all(&self, queue: &[RaffleId], joined: &mut JoinedSet) -> EntrySummary {
        let mut summary = EntrySummary {
            total: queue.len(),
            ..Default::default()
        };

        let pending: Vec<&RaffleId> = queue.iter().filter(|id| !joined.contains(id)).collect();

        for (index, raffle_id) in pending.iter().enumerate() {
            let ctx = RaffleCtx::new((*raffle_id).clone(), index + 1, pending.len());
            let outcome = self.flow.run(&ctx).await;

            if outcome.leaves_total() {
                summary.total = summary.total.saturating_sub(1);
            }

            if outcome == RaffleOutcome::Entered {
                summary.entered += 1;
                info!(
                    "✅ 已参与抽奖 {} ({}/{})",
                    raffle_id, summary.entered, summary.total
                );
            }

            if outcome.marks_joined() {
                joined.insert((*raffle_id).clone());
            }

            summary.outcomes.push(((*raffle_id).clone(), outcome));
        }

        if summary.entered > 0 {
            info!("✓ 本轮队列处理完成");
        }

        summary
    }
}
