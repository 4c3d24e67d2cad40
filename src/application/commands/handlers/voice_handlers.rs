//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{CloneVoice, DeleteVoice};
use crate::application::engine_host::EngineHost;
use crate::application::error::ApplicationError;
use crate::application::ports::VoiceRegistryPort;
use crate::domain::voice::Voice;

// ============================================================================
// CloneVoice
// ============================================================================

/// CloneVoice Handler
pub struct CloneVoiceHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
    engine_host: Arc<EngineHost>,
}

impl CloneVoiceHandler {
    pub fn new(voice_registry: Arc<dyn VoiceRegistryPort>, engine_host: Arc<EngineHost>) -> Self {
        Self {
            voice_registry,
            engine_host,
        }
    }

    pub async fn handle(&self, command: CloneVoice) -> Result<Voice, ApplicationError> {
        // 模型未就绪时克隆的音色无法使用
        if !self.engine_host.is_ready() {
            return Err(ApplicationError::AdapterUnavailable);
        }

        let voice = self
            .voice_registry
            .register(&command.name, &command.audio)
            .await?;

        tracing::info!(
            voice_id = %voice.id(),
            size = command.audio.len(),
            "Voice cloned"
        );

        Ok(voice)
    }
}

// ============================================================================
// DeleteVoice
// ============================================================================

/// DeleteVoice Handler
pub struct DeleteVoiceHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
}

impl DeleteVoiceHandler {
    pub fn new(voice_registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { voice_registry }
    }

    pub async fn handle(&self, command: DeleteVoice) -> Result<Voice, ApplicationError> {
        let voice = self.voice_registry.delete(&command.voice_id).await?;

        tracing::info!(voice_id = %voice.id(), "Voice deleted");

        Ok(voice)
    }
}
