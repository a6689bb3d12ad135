//! 抽奖处理上下文
//!
//! 封装"我正在处理本轮队列中的第几个抽奖"这一信息

use crate::models::RaffleId;
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct RaffleCtx {
    /// 抽奖 ID
    pub raffle_id: RaffleId,

    /// 在本轮队列中的位置（从1开始，仅用于日志显示）
    pub position: usize,

    /// 本轮队列长度
    pub queue_len: usize,
}

impl RaffleCtx {
    pub fn new(raffle_id: RaffleId, position: usize, queue_len: usize) -> Self {
        Self {
            raffle_id,
            position,
            queue_len,
        }
    }
}

impl Display for RaffleCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[抽奖 {} #{}/{}]",
            self.raffle_id, self.position, self.queue_len
        )
    }
}
