use anyhow::Result;
use clap::Parser;
use quizgen::cli::Cli;
use quizgen::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    let cli = Cli::parse();

    // 加载配置
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    // 初始化并运行应用
    App::initialize(config).run(cli.command).await?;

    Ok(())
}
