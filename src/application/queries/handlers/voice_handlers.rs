//! Voice Query Handlers

use std::sync::Arc;

use crate::application::ports::VoiceRegistryPort;
use crate::application::queries::ListVoices;
use crate::domain::voice::{Voice, VoiceKind};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色列表条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSummary {
    pub id: String,
    pub name: String,
    pub kind: VoiceKind,
    pub language: String,
}

impl From<&Voice> for VoiceSummary {
    fn from(voice: &Voice) -> Self {
        Self {
            id: voice.id().to_string(),
            name: voice.display_name().to_string(),
            kind: voice.kind(),
            language: voice.language().to_string(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
}

impl ListVoicesHandler {
    pub fn new(voice_registry: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { voice_registry }
    }

    pub async fn handle(&self, _query: ListVoices) -> Vec<VoiceSummary> {
        self.voice_registry
            .list()
            .await
            .iter()
            .map(VoiceSummary::from)
            .collect()
    }
}
