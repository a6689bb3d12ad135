//! 扫描 / 参与主循环 - 编排层
//!
//! 状态机：
//!
//! ```text
//! Scanning ──队列非空──▶ Joining ──完成──▶ Scanning
//!    │
//!    └──队列为空──▶ Idling ──等待 scan_delay──▶ Scanning
//!                     │
//!                     └──次数用完──▶ Terminated
//! ```
//!
//! 任意状态遇到封禁错误立即终止。扫描间隔是循环自身的状态，
//! 所有等待都经过注入的 `Pacer`。

use crate::config::{Config, JoinOptions};
use crate::error::ScanError;
use crate::infrastructure::{Pacer, SessionContext};
use crate::models::{RaffleId, RaffleLedger};
use crate::orchestrator::raffle_entrant::RaffleEntrant;
use crate::services::{RaffleScanner, ScanSettings};
use crate::utils::logging;
use crate::workflow::RaffleFlow;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Scanning,
    Joining(Vec<RaffleId>),
    Idling,
    Terminated,
}

/// 一次运行的汇总
#[derive(Debug, Default, Clone)]
pub struct RunReport {
    /// 已执行的扫描次数
    pub cycles: u64,
    /// 成功参与的抽奖数
    pub entered: usize,
    /// 结束时已参与集合的大小
    pub joined: usize,
    /// 结束时的扫描间隔
    pub scan_delay: Duration,
}

pub struct JoinLoop<'a> {
    scanner: RaffleScanner<'a>,
    entrant: RaffleEntrant<'a>,
    pacer: &'a dyn Pacer,
    cycle_limit: Option<u64>,
    increment_scan_delay: bool,
    scan_delay_step: Duration,
    scan_delay: Duration,
    ledger: RaffleLedger,
    cycles: u64,
}

impl<'a> JoinLoop<'a> {
    pub fn new(
        session: &'a SessionContext,
        pacer: &'a dyn Pacer,
        config: &Config,
        options: &JoinOptions,
    ) -> Self {
        let scanner = RaffleScanner::new(
            session,
            pacer,
            ScanSettings {
                sort_by_time_left: options.sort_by_time_left,
                paginate_delay: config.paginate_delay(),
                retry_delay: config.retry_delay(),
            },
        );
        let flow = RaffleFlow::new(session, pacer, options.paranoid, config.join_delay());

        Self {
            scanner,
            entrant: RaffleEntrant::new(flow),
            pacer,
            cycle_limit: options.cycle_limit(),
            increment_scan_delay: options.increment_scan_delay,
            scan_delay_step: Duration::from_millis(config.scan_delay_step_ms),
            scan_delay: Duration::from_millis(config.initial_scan_delay_ms),
            ledger: RaffleLedger::new(),
            cycles: 0,
        }
    }

    /// 运行直到次数用完或遇到致命错误
    pub async fn run(&mut self) -> Result<RunReport, ScanError> {
        debug!("开始循环，次数上限: {:?}", self.cycle_limit);

        let mut report = RunReport::default();
        let mut state = LoopState::Scanning;

        while state != LoopState::Terminated {
            state = match state {
                LoopState::Scanning => self.scan().await?,
                LoopState::Joining(queue) => {
                    info!("🎟️ 准备参与 {} 个抽奖", queue.len());
                    let summary = self.entrant.enter_all(&queue, &mut self.ledger.joined).await;
                    report.entered += summary.entered;
                    logging::log_cycle_complete(self.cycles, &summary);
                    LoopState::Scanning
                }
                LoopState::Idling => self.idle().await,
                LoopState::Terminated => LoopState::Terminated,
            };
        }

        if self.ledger.joined.is_empty() {
            debug!("循环结束，本次运行没有处理任何抽奖");
        } else {
            debug!("循环结束");
        }

        report.cycles = self.cycles;
        report.joined = self.ledger.joined.len();
        report.scan_delay = self.scan_delay;
        Ok(report)
    }

    fn budget_exhausted(&self) -> bool {
        matches!(self.cycle_limit, Some(limit) if self.cycles >= limit)
    }

    async fn scan(&mut self) -> Result<LoopState, ScanError> {
        if self.budget_exhausted() {
            return Ok(LoopState::Terminated);
        }

        self.cycles += 1;
        info!("🔍 正在扫描抽奖 (第 {} 次)", self.cycles);

        let queue = self.scanner.scan(&mut self.ledger).await?;
        if queue.is_empty() {
            Ok(LoopState::Idling)
        } else {
            Ok(LoopState::Joining(queue))
        }
    }

    async fn idle(&mut self) -> LoopState {
        if self.budget_exhausted() {
            debug!("已到达循环次数上限，结束");
            return LoopState::Terminated;
        }

        debug!(
            "所有抽奖都已参与，{} 秒后重新扫描",
            self.scan_delay.as_secs()
        );
        self.pacer.pause(self.scan_delay).await;

        if self.increment_scan_delay {
            self.scan_delay += self.scan_delay_step;
        }

        LoopState::Scanning
    }
}
