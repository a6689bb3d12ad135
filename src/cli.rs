use crate::config::JoinOptions;
use clap::{Args, Parser, Subcommand};

/// 自动扫描并参与 scrap.tf 抽奖
#[derive(Parser, Debug)]
#[command(name = "raffle_runner", author, version, about, long_about = None)]
pub struct Cli {
    /// 输出 debug 日志
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 扫描并参与所有可参与的抽奖
    JoinRaffles(JoinArgs),
    /// 检查是否有需要领取的中奖抽奖
    CheckWon(CheckWonArgs),
    /// 保存 scr_session cookie 到文件
    SaveCookie {
        /// scr_session cookie 的值
        cookie: String,
    },
    /// 检查新版本
    CheckUpdates {
        /// 有新版本时在浏览器中打开发布页
        #[arg(short, long)]
        open: bool,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::JoinRaffles(_) => "join-raffles",
            Command::CheckWon(_) => "check-won",
            Command::SaveCookie { .. } => "save-cookie",
            Command::CheckUpdates { .. } => "check-updates",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CookieArg {
    /// scr_session cookie 的值，省略时使用已保存的 cookie
    #[arg(short, long)]
    pub cookie: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckWonArgs {
    #[command(flatten)]
    pub cookie: CookieArg,

    /// 有待领取的抽奖时在浏览器中打开中奖列表页
    #[arg(short, long)]
    pub open: bool,
}

#[derive(Args, Debug, Clone)]
pub struct JoinArgs {
    #[command(flatten)]
    pub cookie: CookieArg,

    /// 扫描次数，省略或为 0 表示无限循环
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub repeat: i64,

    /// 按剩余时间排序，而不是按创建时间
    #[arg(short = 'e', long = "ending")]
    pub ending: bool,

    /// 上一次扫描没有可参与的抽奖时递增扫描间隔
    #[arg(short = 'i', long = "increment-scan-delay")]
    pub increment_scan_delay: bool,

    /// 跳过可能是陷阱的抽奖（可能误判）
    #[arg(short, long)]
    pub paranoid: bool,
}

impl From<&JoinArgs> for JoinOptions {
    fn from(args: &JoinArgs) -> Self {
        JoinOptions {
            repeat: args.repeat,
            sort_by_time_left: args.ending,
            increment_scan_delay: args.increment_scan_delay,
            paranoid: args.paranoid,
        }
    }
}
