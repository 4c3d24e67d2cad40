//! XTTS Gateway - Serverless 入口
//!
//! 从标准输入逐行读取任务 JSON，每行输出一个结果 JSON。
//! 日志写到标准错误，标准输出只承载结果

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;
use xtts_gateway::application::EngineHost;
use xtts_gateway::config::load_config;
use xtts_gateway::infrastructure::adapters::{create_engine_loader, WavPacker};
use xtts_gateway::infrastructure::serverless::{JobOutput, ServerlessHandler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    let log_filter = format!("{},xtts_gateway={}", config.log.level, config.log.level);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    // 引擎在第一个任务到达时加载
    let engine_host = Arc::new(EngineHost::new(
        create_engine_loader(&config.engine),
        Duration::from_secs(config.engine.timeout_secs),
    ));
    let handler = ServerlessHandler::new(engine_host, Arc::new(WavPacker::new()));

    tracing::info!("Serverless worker ready, reading jobs from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match serde_json::from_str::<serde_json::Value>(&line) {
            Ok(job) => handler.handle(job).await,
            Err(e) => JobOutput::Failure {
                error: format!("Invalid job JSON: {}", e),
            },
        };

        let mut encoded = serde_json::to_vec(&output)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }

    tracing::info!("Input closed, serverless worker exiting");

    Ok(())
}
