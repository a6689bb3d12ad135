//! 提取规则
//!
//! 每条规则都是"原始 HTML → 可选的类型化结果"的具名函数。
//! 调用方只依赖这些函数，底层用正则还是 DOM 查询可以随时替换。

use crate::models::RaffleId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// 详情页中表示抽奖已结束的标记
pub const ENDED_MARKER: &str = r#"data-time="Raffle Ended""#;

/// 分页错误消息中表示账号被封禁的标记
pub const BAN_MARKER: &str = "active site ban";

/// 尚未参与的抽奖面板
pub const OPEN_PANEL_SELECTOR: &str = ".panel-raffle:not(.raffle-entered)";

static CSRF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"value="([a-f\d]{64})""#).expect("CSRF 正则无效"));

static REDIRECT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ScrapTF\.Raffles\.RedirectToRaffle\('(?P<id>[A-Z0-9]{6,})'\)")
        .expect("跳转正则无效")
});

static HASH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"EnterRaffle\('(?P<id>[A-Z0-9]{6,})', '(?P<hash>[a-f0-9]{64})'")
        .expect("hash 正则无效")
});

static LIMIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"total="(?P<entered>\d+)" data-max="(?P<max>\d+)"#).expect("人数正则无效")
});

static WON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"You've won (?P<amount>\d+) raffles? that must be withdrawn")
        .expect("中奖正则无效")
});

/// 已参与人数 / 人数上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLimits {
    pub entered: u32,
    pub max: u32,
}

impl EntryLimits {
    pub fn is_full(&self) -> bool {
        self.entered >= self.max
    }
}

/// 从首页提取 64 位十六进制的 CSRF token
pub fn csrf_token(html: &str) -> Option<String> {
    CSRF_PATTERN
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 从单个面板的 HTML 中提取抽奖 ID
pub fn panel_raffle_id(panel_html: &str) -> Option<RaffleId> {
    REDIRECT_PATTERN
        .captures(panel_html)
        .and_then(|caps| caps.name("id"))
        .and_then(|m| RaffleId::parse(m.as_str()))
}

/// 解析整页 HTML，按文档顺序返回所有未参与面板中的抽奖 ID
///
/// 匹配不到 ID 的面板直接跳过；重复 ID 由调用方去重。
pub fn open_panel_ids(html: &str) -> Vec<RaffleId> {
    let Ok(selector) = Selector::parse(OPEN_PANEL_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|panel| panel_raffle_id(&panel.html()))
        .collect()
}

/// 详情页是否带有"已结束"标记
pub fn is_ended(detail_html: &str) -> bool {
    detail_html.contains(ENDED_MARKER)
}

/// 提取参与人数和上限
pub fn entry_limits(detail_html: &str) -> Option<EntryLimits> {
    let caps = LIMIT_PATTERN.captures(detail_html)?;
    let entered = caps.name("entered")?.as_str().parse().ok()?;
    let max = caps.name("max")?.as_str().parse().ok()?;
    Some(EntryLimits { entered, max })
}

/// 提取与该抽奖 ID 对应的参与 hash
pub fn entry_hash(detail_html: &str, raffle_id: &RaffleId) -> Option<String> {
    HASH_PATTERN
        .captures_iter(detail_html)
        .find(|caps| caps.name("id").map(|m| m.as_str()) == Some(raffle_id.as_str()))
        .and_then(|caps| caps.name("hash"))
        .map(|m| m.as_str().to_string())
}

/// 首页提示的待领取中奖数量，没有提示时为 0
pub fn won_raffle_count(html: &str) -> u32 {
    WON_PATTERN
        .captures(html)
        .and_then(|caps| caps.name("amount"))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// 分页错误消息是否表示账号被封禁
pub fn is_ban_message(message: &str) -> bool {
    message.contains(BAN_MARKER)
}
