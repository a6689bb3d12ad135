//! # Raffle Runner
//!
//! 自动扫描并参与 scrap.tf 抽奖的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端、定时器），只暴露能力
//! - `HttpExecutor` - 唯一的 reqwest 客户端 owner，提供 GET / 表单 POST
//! - `SessionContext` - 绑定 CSRF token，所有 POST 自动附带
//! - `Pacer` - 所有等待的唯一入口
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个页面或单个抽奖
//! - `RaffleScanner` - 列表页 + 分页接口扫描
//! - `EntryClassifier` - 根据详情页决定跳过或参与
//! - `EntrySubmitter` - 提交参与请求
//! - `CookieStore` / `UpdateChecker` / `won_checker` - 辅助命令
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个抽奖"的完整处理流程
//! - `RaffleCtx` - 上下文封装（raffle_id + 队列位置）
//! - `RaffleFlow` - 流程编排（fetch → classify → submit → pause）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 子命令入口，管理资源
//! - `orchestrator/join_loop` - 扫描 / 参与 / 等待状态机
//! - `orchestrator/raffle_entrant` - 单轮队列处理器
//!
//! 页面解析规则集中在 `extraction`，数据类型在 `models`。
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, JoinOptions};
pub use error::AppError;
pub use infrastructure::{HttpExecutor, HttpReply, Pacer, RaffleTransport, SessionContext, TokioPacer};
pub use models::{Classification, RaffleId, RaffleOutcome};
pub use orchestrator::{App, EntrySummary, JoinLoop, RunReport};
pub use workflow::{RaffleCtx, RaffleFlow};
