//! Fake Synthesis Engine - 本地开发和测试用的推理引擎
//!
//! 不加载模型，按文本长度生成固定频率的正弦波

use async_trait::async_trait;
use std::f32::consts::PI;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    EngineError, EngineInfo, EngineLoaderPort, SynthesisEnginePort, SynthesisRequest,
    OUTPUT_SAMPLE_RATE,
};

/// Fake 引擎配置
#[derive(Debug, Clone)]
pub struct FakeEngineConfig {
    pub model: String,
    /// 每个字符生成的时长（秒）
    pub seconds_per_char: f32,
    /// 模拟推理延迟
    pub latency: Duration,
}

impl Default for FakeEngineConfig {
    fn default() -> Self {
        Self {
            model: "fake".to_string(),
            seconds_per_char: 0.06,
            latency: Duration::ZERO,
        }
    }
}

/// Fake 引擎
///
/// 内置音色 220 Hz，克隆音色 330 Hz；克隆时检查参考音频是否存在
pub struct FakeSynthesisEngine {
    config: FakeEngineConfig,
}

impl FakeSynthesisEngine {
    pub fn new(config: FakeEngineConfig) -> Self {
        Self { config }
    }

    fn tone(&self, text: &str, frequency: f32) -> Vec<f32> {
        let chars = text.chars().count().max(1) as f32;
        let len = (chars * self.config.seconds_per_char * OUTPUT_SAMPLE_RATE as f32) as usize;
        let step = 2.0 * PI * frequency / OUTPUT_SAMPLE_RATE as f32;
        (0..len.max(1))
            .map(|i| 0.4 * (step * i as f32 + PI / 4.0).sin())
            .collect()
    }
}

#[async_trait]
impl SynthesisEnginePort for FakeSynthesisEngine {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<f32>, EngineError> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        match &request {
            SynthesisRequest::Preset { text, speaker, .. } => {
                tracing::debug!(speaker = %speaker, text_len = text.len(), "FakeSynthesisEngine: preset tone");
                Ok(self.tone(text, 220.0))
            }
            SynthesisRequest::Cloned {
                text, speaker_wav, ..
            } => {
                if !tokio::fs::try_exists(speaker_wav).await.unwrap_or(false) {
                    return Err(EngineError::ServiceError(format!(
                        "Reference audio not found: {}",
                        speaker_wav.display()
                    )));
                }
                tracing::debug!(speaker_wav = %speaker_wav.display(), text_len = text.len(), "FakeSynthesisEngine: cloned tone");
                Ok(self.tone(text, 330.0))
            }
        }
    }

    fn info(&self) -> EngineInfo {
        EngineInfo {
            device: "cpu".to_string(),
            model: self.config.model.clone(),
            cuda_available: false,
        }
    }
}

/// Fake 引擎加载器
#[derive(Debug, Clone, Default)]
pub struct FakeEngineLoader {
    config: FakeEngineConfig,
}

impl FakeEngineLoader {
    pub fn new(config: FakeEngineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EngineLoaderPort for FakeEngineLoader {
    async fn load(&self) -> Result<Arc<dyn SynthesisEnginePort>, EngineError> {
        tracing::info!(model = %self.config.model, "Using fake synthesis engine");
        Ok(Arc::new(FakeSynthesisEngine::new(self.config.clone())))
    }
}
