//! Synthesis Commands

use crate::application::ports::SamplerParams;

/// 默认音色 id（HTTP 前端）
pub const DEFAULT_SPEAKER_ID: &str = "female_1";

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "en";

/// 文本转语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    pub speaker_id: String,
    pub language: String,
    pub params: SamplerParams,
}

impl SynthesizeSpeech {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker_id: DEFAULT_SPEAKER_ID.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            params: SamplerParams::default(),
        }
    }

    pub fn with_speaker(mut self, speaker_id: impl Into<String>) -> Self {
        self.speaker_id = speaker_id.into();
        self
    }
}
