use std::fmt::{self, Display};

/// 抽奖 ID（站点分配，大写字母数字，至少 6 位）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RaffleId(String);

impl RaffleId {
    /// 校验并创建抽奖 ID，不符合格式时返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() >= 6
            && raw
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 详情页路径
    pub fn detail_path(&self) -> String {
        format!("/raffles/{}", self.0)
    }
}

impl Display for RaffleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 单次参与尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaffleOutcome {
    /// 成功参与
    Entered,
    /// 抽奖已结束
    AlreadyEnded,
    /// 参与人数已满
    Full { entered: u32, max: u32 },
    /// 参与人数过少（paranoid 模式）
    TooFewEntries { entered: u32 },
    /// 详情页中找不到 hash
    HashMissing,
    /// 站点拒绝了参与请求
    SiteRejected(String),
}

impl RaffleOutcome {
    /// 是否记入已参与集合（之后的扫描不再考虑）
    pub fn marks_joined(&self) -> bool {
        matches!(
            self,
            RaffleOutcome::Entered
                | RaffleOutcome::AlreadyEnded
                | RaffleOutcome::Full { .. }
                | RaffleOutcome::HashMissing
        )
    }

    /// 是否从本轮的待参与总数中扣除
    pub fn leaves_total(&self) -> bool {
        matches!(
            self,
            RaffleOutcome::AlreadyEnded
                | RaffleOutcome::Full { .. }
                | RaffleOutcome::TooFewEntries { .. }
        )
    }
}

/// 分类器对详情页的判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 不需要（或无法）发起参与请求
    Skip(RaffleOutcome),
    /// 可以参与，附带提交所需的 hash
    Enterable { hash: String },
}
