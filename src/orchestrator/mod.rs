//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责资源组装和循环调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 按子命令加载 cookie、创建传输层、认证
//! - 只有本模块创建 `SessionContext`
//!
//! ### `join_loop` - 扫描 / 参与主循环
//! - Scanning → Joining / Idling → Terminated 状态机
//! - 持有已参与集合、扫描间隔和次数上限
//!
//! ### `raffle_entrant` - 单轮队列处理器
//! - 串行处理本轮队列，更新已参与集合并统计
//!
//! ## 层次关系
//!
//! ```text
//! app (处理子命令)
//!     ↓
//! join_loop (扫描 / 等待 / 次数上限)
//!     ↓
//! raffle_entrant (处理 Vec<RaffleId>)
//!     ↓
//! workflow::RaffleFlow (处理单个抽奖)
//!     ↓
//! services (能力层：scan / classify / submit)
//!     ↓
//! infrastructure (基础设施：HttpExecutor / Pacer)
//! ```

pub mod app;
pub mod join_loop;
pub mod raffle_entrant;

// 重新导出主要类型
pub use app::App;
pub use join_loop::{JoinLoop, LoopState, RunReport};
pub use raffle_entrant::{EntrySummary, RaffleEntrant};
