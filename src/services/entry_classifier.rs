//! 抽奖详情页分类 - 业务能力层
//!
//! 判定顺序：
//! 1. 已结束标记 → `AlreadyEnded`
//! 2. 人数信息：paranoid 且人数 < 2 → `TooFewEntries`；人数已满 → `Full`
//! 3. 找不到 hash → `HashMissing`
//! 4. 其余 → 可参与

use crate::extraction;
use crate::models::{Classification, RaffleId, RaffleOutcome};

/// paranoid 模式下低于该人数的抽奖视为可能的陷阱
pub const PARANOID_MIN_ENTRIES: u32 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct EntryClassifier {
    paranoid: bool,
}

impl EntryClassifier {
    pub fn new(paranoid: bool) -> Self {
        Self { paranoid }
    }

    pub fn classify(&self, raffle_id: &RaffleId, detail_html: &str) -> Classification {
        if extraction::is_ended(detail_html) {
            return Classification::Skip(RaffleOutcome::AlreadyEnded);
        }

        if let Some(limits) = extraction::entry_limits(detail_html) {
            // 启发式的陷阱判断，可能误伤
            if self.paranoid && limits.entered < PARANOID_MIN_ENTRIES {
                return Classification::Skip(RaffleOutcome::TooFewEntries {
                    entered: limits.entered,
                });
            }
            if limits.is_full() {
                return Classification::Skip(RaffleOutcome::Full {
                    entered: limits.entered,
                    max: limits.max,
                });
            }
        }

        match extraction::entry_hash(detail_html, raffle_id) {
            Some(hash) => Classification::Enterable { hash },
            None => Classification::Skip(RaffleOutcome::HashMissing),
        }
    }
}
