use clap::Parser;
use raffle_runner::cli::Cli;
use raffle_runner::utils::logging;
use raffle_runner::{App, Config};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load();
    let verbose = config.as_ref().map(|c| c.verbose_logging).unwrap_or(false);

    // 初始化日志
    logging::init(cli.debug || verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::log_startup(cli.command.name(), &config.base_url);

    let app = App::new(config);
    tokio::select! {
        result = app.execute(cli.command) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("❌ {:#}", e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("👋 收到中断信号，退出");
            ExitCode::SUCCESS
        }
    }
}
