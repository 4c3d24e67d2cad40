//! XTTS Gateway - HTTP 服务入口
//!
//! 启动顺序：配置 → 日志 → 音色注册表 → 引擎加载 → HTTP 服务

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use xtts_gateway::application::{EngineHost, EngineInfo};
use xtts_gateway::config::{load_config, print_config};
use xtts_gateway::infrastructure::adapters::{
    create_engine_loader, FileVoiceSampleStore, WavPacker,
};
use xtts_gateway::infrastructure::http::{AppState, HttpServer, StateOptions};
use xtts_gateway::infrastructure::memory::InMemoryVoiceRegistry;

/// 后台加载失败后的重试间隔
const MODEL_LOAD_RETRY_INITIAL: Duration = Duration::from_secs(1);
const MODEL_LOAD_RETRY_MAX: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},xtts_gateway={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("XTTS Gateway v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 音色注册表：扫描参考音频目录
    let store = FileVoiceSampleStore::new(&config.voices.dir).await?;
    let voice_registry = Arc::new(InMemoryVoiceRegistry::new(Arc::new(store)));
    let custom_voices = voice_registry.load().await?;
    tracing::info!(custom_voices, "Voice registry ready");

    // 推理引擎
    let engine_host = Arc::new(EngineHost::new(
        create_engine_loader(&config.engine),
        Duration::from_secs(config.engine.timeout_secs),
    ));

    if config.engine.eager_load {
        // 加载失败直接退出，不接受流量
        engine_host
            .initialize()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load TTS model: {}", e))?;
    } else {
        // 后台加载，完成前 /tts 与 /clone 返回 503；失败按退避重试
        let host = engine_host.clone();
        tokio::spawn(async move {
            host.initialize_with_retry(MODEL_LOAD_RETRY_INITIAL, MODEL_LOAD_RETRY_MAX)
                .await;
        });
    }

    let state = AppState::new(
        voice_registry,
        engine_host,
        Arc::new(WavPacker::new()),
        StateOptions {
            configured_engine: EngineInfo {
                device: config.engine.device.clone(),
                model: config.engine.model.clone(),
                cuda_available: false,
            },
            strict_resolution: config.voices.strict_resolution,
            max_upload_size: config.voices.max_upload_size,
        },
    );

    let server = HttpServer::new(config.server.clone(), Arc::new(state));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
