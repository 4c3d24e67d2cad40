//! Synthesis Command Handlers

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::commands::SynthesizeSpeech;
use crate::application::engine_host::EngineHost;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioPackerPort, PackedAudio, SamplerParams, SynthesisRequest, VoiceRegistryPort,
    OUTPUT_SAMPLE_RATE,
};
use crate::domain::voice::{Voice, VoiceReference};

/// 按音色类型构造引擎请求
///
/// 内置音色走预设模式，采样参数不转发；克隆音色转发完整参数
pub fn synthesis_request_for(
    voice: &Voice,
    text: &str,
    language: &str,
    params: SamplerParams,
) -> SynthesisRequest {
    match voice.reference() {
        VoiceReference::Preset(speaker) => SynthesisRequest::Preset {
            text: text.to_string(),
            speaker: speaker.clone(),
            language: language.to_string(),
        },
        VoiceReference::Sample(path) => SynthesisRequest::Cloned {
            text: text.to_string(),
            speaker_wav: path.clone(),
            language: language.to_string(),
            params,
        },
    }
}

// ============================================================================
// SynthesizeSpeech
// ============================================================================

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    pub audio: PackedAudio,
    pub voice: Voice,
    /// 文本字符数
    pub text_length: usize,
    pub generation_time: Duration,
}

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    voice_registry: Arc<dyn VoiceRegistryPort>,
    engine_host: Arc<EngineHost>,
    packer: Arc<dyn AudioPackerPort>,
    /// 严格模式下未知音色直接报错，不回退
    strict_resolution: bool,
}

impl SynthesizeSpeechHandler {
    pub fn new(
        voice_registry: Arc<dyn VoiceRegistryPort>,
        engine_host: Arc<EngineHost>,
        packer: Arc<dyn AudioPackerPort>,
        strict_resolution: bool,
    ) -> Self {
        Self {
            voice_registry,
            engine_host,
            packer,
            strict_resolution,
        }
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        // 纯空白文本仍交给引擎，只拒绝空串
        if command.text.is_empty() {
            return Err(ApplicationError::MissingText);
        }
        if !self.engine_host.is_ready() {
            return Err(ApplicationError::AdapterUnavailable);
        }

        let started = Instant::now();

        let voice = if self.strict_resolution {
            self.voice_registry
                .lookup(&command.speaker_id)
                .await
                .ok_or_else(|| ApplicationError::VoiceNotFound(command.speaker_id.clone()))?
        } else {
            self.voice_registry.resolve(&command.speaker_id).await
        };

        let request =
            synthesis_request_for(&voice, &command.text, &command.language, command.params);
        let samples = self.engine_host.synthesize(request).await?;
        let audio = self.packer.pack(&samples, OUTPUT_SAMPLE_RATE)?;

        let generation_time = started.elapsed();
        let text_length = command.text.chars().count();

        tracing::info!(
            voice_id = %voice.id(),
            kind = voice.kind().as_str(),
            text_length,
            samples = audio.sample_count,
            elapsed_ms = generation_time.as_millis() as u64,
            "Speech generated"
        );

        Ok(SynthesizeSpeechResponse {
            audio,
            voice,
            text_length,
            generation_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceId;
    use std::path::PathBuf;

    #[test]
    fn test_builtin_voice_uses_preset_mode() {
        let voice = Voice::builtin(VoiceId::normalize("female_2"), "Daisy Studious");
        let request = synthesis_request_for(&voice, "hi", "de", SamplerParams::default());
        assert_eq!(
            request,
            SynthesisRequest::Preset {
                text: "hi".into(),
                speaker: "Daisy Studious".into(),
                language: "de".into(),
            }
        );
    }

    #[test]
    fn test_custom_voice_forwards_sampler_params() {
        let voice = Voice::custom(
            VoiceId::normalize("narrator"),
            PathBuf::from("/voices/narrator.wav"),
        );
        let params = SamplerParams {
            temperature: 0.3,
            top_k: 10,
            ..SamplerParams::default()
        };
        let request = synthesis_request_for(&voice, "hi", "en", params);
        match request {
            SynthesisRequest::Cloned {
                speaker_wav,
                params: forwarded,
                ..
            } => {
                assert_eq!(speaker_wav, PathBuf::from("/voices/narrator.wav"));
                assert_eq!(forwarded, params);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }
}
