//! 单个抽奖处理流程 - 流程层
//!
//! 核心职责：定义"一个抽奖"的完整处理流程
//!
//! 流程顺序：
//! 1. 获取详情页
//! 2. 分类（已结束 / 已满 / 人数过少 / 无 hash / 可参与）
//! 3. 可参与时提交请求，并在提交后等待固定间隔

use crate::infrastructure::{Pacer, SessionContext};
use crate::models::{Classification, RaffleOutcome};
use crate::services::{EntryClassifier, EntrySubmitter};
use crate::workflow::raffle_ctx::RaffleCtx;
use std::time::Duration;
use tracing::{debug, error, info};

/// 单个抽奖处理流程
///
/// - 不修改已参与集合（由上层根据结果决定）
/// - 只有真正发出了参与请求才等待
pub struct RaffleFlow<'a> {
    session: &'a SessionContext,
    pacer: &'a dyn Pacer,
    classifier: EntryClassifier,
    join_delay: Duration,
}

impl<'a> RaffleFlow<'a> {
    pub fn new(
        session: &'a SessionContext,
        pacer: &'a dyn Pacer,
        paranoid: bool,
        join_delay: Duration,
    ) -> Self {
        Self {
            session,
            pacer,
            classifier: EntryClassifier::new(paranoid),
            join_delay,
        }
    }

    pub async fn run(&self, ctx: &RaffleCtx) -> RaffleOutcome {
        debug!("{} 正在参与", ctx);

        let detail_html = match self.session.get_text(&ctx.raffle_id.detail_path()).await {
            Ok(html) => html,
            Err(e) => {
                error!("{} 无法获取详情页: {}", ctx, e);
                return RaffleOutcome::SiteRejected(e.to_string());
            }
        };

        let hash = match self.classifier.classify(&ctx.raffle_id, &detail_html) {
            Classification::Enterable { hash } => hash,
            Classification::Skip(outcome) => {
                log_skip(ctx, &outcome);
                return outcome;
            }
        };

        let outcome = EntrySubmitter::new(self.session)
            .submit(&ctx.raffle_id, &hash)
            .await;

        if let RaffleOutcome::SiteRejected(reason) = &outcome {
            error!("{} 无法参与: {}", ctx, reason);
        }

        self.pacer.pause(self.join_delay).await;

        outcome
    }
}

fn log_skip(ctx: &RaffleCtx, outcome: &RaffleOutcome) {
    match outcome {
        RaffleOutcome::AlreadyEnded => info!("{} 已结束", ctx),
        RaffleOutcome::Full { entered, max } => {
            info!("{} 人数已满 ({}/{})", ctx, entered, max)
        }
        RaffleOutcome::TooFewEntries { entered } => {
            info!("{} 参与人数过少 ({}，paranoid 模式)", ctx, entered)
        }
        RaffleOutcome::HashMissing => error!("{} 无法获取 hash", ctx),
        RaffleOutcome::Entered | RaffleOutcome::SiteRejected(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{RecordingPacer, ScriptedTransport};
    use crate::models::RaffleId;
    use crate::services::entry_submitter::ENTER_ENDPOINT;
    use std::sync::Arc;

    const HASH: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn ctx() -> RaffleCtx {
        RaffleCtx::new(RaffleId::parse("ABC123").unwrap(), 1, 1)
    }

    #[tokio::test]
    async fn test_enterable_raffle_is_submitted_then_paced() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.on_get(
            "/raffles/ABC123",
            format!(r#"total="3" data-max="10" EnterRaffle('ABC123', '{}')"#, HASH),
        );
        transport.on_post_json(ENTER_ENDPOINT, r#"{"success":true}"#);
        let session = SessionContext::new(transport.clone(), "tok", "https://scrap.tf");
        let pacer = RecordingPacer::new();

        let flow = RaffleFlow::new(&session, &pacer, false, Duration::from_secs(4));
        let outcome = flow.run(&ctx()).await;

        assert_eq!(outcome, RaffleOutcome::Entered);
        assert_eq!(transport.posts_to(ENTER_ENDPOINT)[0].field("hash"), Some(HASH));
        assert_eq!(pacer.pauses(), vec![Duration::from_secs(4)]);
    }

    #[tokio::test]
    async fn test_skipped_raffle_is_not_paced() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.on_get("/raffles/ABC123", r#"<span data-time="Raffle Ended"></span>"#);
        let session = SessionContext::new(transport.clone(), "tok", "https://scrap.tf");
        let pacer = RecordingPacer::new();

        let flow = RaffleFlow::new(&session, &pacer, false, Duration::from_secs(4));
        let outcome = flow.run(&ctx()).await;

        assert_eq!(outcome, RaffleOutcome::AlreadyEnded);
        assert!(transport.posts().is_empty());
        assert!(pacer.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_detail_page_failure_is_retryable() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail_get("/raffles/ABC123", 500);
        let session = SessionContext::new(transport.clone(), "tok", "https://scrap.tf");
        let pacer = RecordingPacer::new();

        let flow = RaffleFlow::new(&session, &pacer, false, Duration::from_secs(4));
        let outcome = flow.run(&ctx()).await;

        assert!(matches!(outcome, RaffleOutcome::SiteRejected(_)));
        assert!(!outcome.marks_joined());
        assert!(pacer.pauses().is_empty());
    }
}
