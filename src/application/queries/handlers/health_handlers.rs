//! Health Query Handlers

use std::sync::Arc;

use crate::application::engine_host::EngineHost;
use crate::application::ports::{EngineInfo, VoiceRegistryPort};
use crate::application::queries::GetHealth;

/// 健康状态
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub device: String,
    pub model: String,
    pub cuda_available: bool,
    /// 自定义音色数量
    pub voices_loaded: usize,
    pub model_loaded: bool,
}

/// GetHealth Handler
pub struct GetHealthHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
    engine_host: Arc<EngineHost>,
    /// 引擎未加载时展示的配置值
    configured: EngineInfo,
}

impl GetHealthHandler {
    pub fn new(
        voice_registry: Arc<dyn VoiceRegistryPort>,
        engine_host: Arc<EngineHost>,
        configured: EngineInfo,
    ) -> Self {
        Self {
            voice_registry,
            engine_host,
            configured,
        }
    }

    pub async fn handle(&self, _query: GetHealth) -> HealthReport {
        let model_loaded = self.engine_host.is_ready();
        let info = self
            .engine_host
            .info()
            .unwrap_or_else(|| self.configured.clone());

        HealthReport {
            device: info.device,
            model: info.model,
            cuda_available: info.cuda_available,
            voices_loaded: self.voice_registry.custom_count().await,
            model_loaded,
        }
    }
}
