//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态，由启动流程显式构造后注入路由

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloneVoiceHandler, DeleteVoiceHandler, SynthesizeSpeechHandler,
    // Query handlers
    GetHealthHandler, ListVoicesHandler,
    // Ports
    AudioPackerPort, EngineHost, EngineInfo, VoiceRegistryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub voice_registry: Arc<dyn VoiceRegistryPort>,
    pub engine_host: Arc<EngineHost>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,
    pub clone_voice_handler: CloneVoiceHandler,
    pub delete_voice_handler: DeleteVoiceHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub health_handler: GetHealthHandler,

    /// 请求体大小上限（字节）
    pub max_upload_size: usize,
}

/// 状态构造选项
#[derive(Debug, Clone)]
pub struct StateOptions {
    /// 引擎未加载时 /health 展示的配置值
    pub configured_engine: EngineInfo,
    pub strict_resolution: bool,
    pub max_upload_size: usize,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        voice_registry: Arc<dyn VoiceRegistryPort>,
        engine_host: Arc<EngineHost>,
        packer: Arc<dyn AudioPackerPort>,
        options: StateOptions,
    ) -> Self {
        Self {
            voice_registry: voice_registry.clone(),
            engine_host: engine_host.clone(),

            // Command handlers
            synthesize_handler: SynthesizeSpeechHandler::new(
                voice_registry.clone(),
                engine_host.clone(),
                packer,
                options.strict_resolution,
            ),
            clone_voice_handler: CloneVoiceHandler::new(
                voice_registry.clone(),
                engine_host.clone(),
            ),
            delete_voice_handler: DeleteVoiceHandler::new(voice_registry.clone()),

            // Query handlers
            list_voices_handler: ListVoicesHandler::new(voice_registry.clone()),
            health_handler: GetHealthHandler::new(
                voice_registry,
                engine_host,
                options.configured_engine,
            ),

            max_upload_size: options.max_upload_size,
        }
    }
}
