//! 运行期间的抽奖记录：待参与队列 + 已参与集合
//!
//! 只在内存中保存，进程退出即丢失。

use crate::models::raffle::RaffleId;
use std::collections::HashSet;

/// 待参与队列：按发现顺序排列，不含重复 ID
#[derive(Debug, Default, Clone)]
pub struct PendingQueue {
    order: Vec<RaffleId>,
    seen: HashSet<RaffleId>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到队尾，已存在时返回 false
    pub fn push(&mut self, id: RaffleId) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.order.push(id);
        true
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn to_vec(&self) -> Vec<RaffleId> {
        self.order.clone()
    }
}

/// 已参与集合：整个运行期间只增不减
#[derive(Debug, Default, Clone)]
pub struct JoinedSet {
    ids: HashSet<RaffleId>,
}

impl JoinedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: RaffleId) {
        self.ids.insert(id);
    }

    pub fn contains(&self, id: &RaffleId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// 扫描器与参与器共享的运行状态
#[derive(Debug, Default)]
pub struct RaffleLedger {
    pub pending: PendingQueue,
    pub joined: JoinedSet,
}

impl RaffleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既不在队列也不在已参与集合中时入队
    pub fn enqueue(&mut self, id: RaffleId) -> bool {
        if self.joined.contains(&id) {
            return false;
        }
        self.pending.push(id)
    }
}
