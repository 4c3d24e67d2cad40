//! Voice Context - Aggregate Root

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{VoiceId, VoiceKind, VoiceReference};

/// 所有音色都标记为多语言（XTTS 模型本身多语言）
pub const VOICE_LANGUAGE: &str = "multilingual";

/// Voice 聚合根
///
/// 不变量:
/// - Builtin 音色的 reference 一定是预设名称
/// - Custom 音色的 reference 一定是参考音频路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    id: VoiceId,
    display_name: String,
    reference: VoiceReference,
}

impl Voice {
    /// 内置预设音色
    pub fn builtin(id: VoiceId, preset: impl Into<String>) -> Self {
        let preset = preset.into();
        Self {
            id,
            display_name: preset.clone(),
            reference: VoiceReference::Preset(preset),
        }
    }

    /// 克隆音色，显示名称即 id
    pub fn custom(id: VoiceId, sample_path: PathBuf) -> Self {
        Self {
            display_name: id.as_str().to_string(),
            id,
            reference: VoiceReference::Sample(sample_path),
        }
    }

    // Getters
    pub fn id(&self) -> &VoiceId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> VoiceKind {
        self.reference.kind()
    }

    pub fn reference(&self) -> &VoiceReference {
        &self.reference
    }

    pub fn language(&self) -> &'static str {
        VOICE_LANGUAGE
    }

    pub fn is_builtin(&self) -> bool {
        self.kind() == VoiceKind::Builtin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_voice() {
        let voice = Voice::builtin(VoiceId::normalize("female_1"), "Claribel Dervla");
        assert_eq!(voice.display_name(), "Claribel Dervla");
        assert_eq!(voice.kind(), VoiceKind::Builtin);
        assert!(voice.reference().sample_path().is_none());
    }

    #[test]
    fn test_custom_voice_uses_id_as_name() {
        let id = VoiceId::sanitize("Narrator").unwrap();
        let voice = Voice::custom(id, PathBuf::from("/tmp/narrator.wav"));
        assert_eq!(voice.display_name(), "narrator");
        assert_eq!(voice.kind(), VoiceKind::Custom);
        assert_eq!(voice.language(), "multilingual");
    }
}
