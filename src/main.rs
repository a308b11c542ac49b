use anyhow::{Context, Result};
use question_loop::{logger, App, Config, Credential};
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(&config.log_file)?;

    println!("Question Loop - 循环提问");

    // 读取 API Key
    let credential = read_credential()?;

    // 初始化并运行应用
    App::initialize(config, credential).await?.run().await?;

    Ok(())
}

/// 优先读取环境变量 `CHAT_API_KEY`，否则从终端输入
fn read_credential() -> Result<Credential> {
    if let Ok(key) = std::env::var("CHAT_API_KEY") {
        if !key.trim().is_empty() {
            return Ok(Credential::new(key)?);
        }
    }

    print!("请输入 API Key: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("无法读取 API Key")?;

    Ok(Credential::new(line)?)
}
