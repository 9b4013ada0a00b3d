use anyhow::Result;
use clap::Parser;
use leitner_drill::services::convert_key_value_to_deck_file;
use leitner_drill::{logger, App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load()?.apply_cli(&cli);

    // 初始化日志
    logger::init_with_level(&config.log_level);

    // 转换模式：只转换文件，不练习
    if let Some(path) = &cli.convert_from_kv {
        convert_key_value_to_deck_file(path).await?;
        return Ok(());
    }

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
