//! Serverless Job Handler
//!
//! 每次调用处理一个任务；引擎在首个任务时加载并在进程内复用。
//! 只支持内置音色，不经过音色注册表

use base64::Engine as _;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use super::job::{JobInput, JobOutput, JobSuccess, ServerlessJob, OUTPUT_FORMAT_BASE64};
use crate::application::{
    synthesis_request_for, ApplicationError, AudioPackerPort, EngineHost, SamplerParams,
    OUTPUT_SAMPLE_RATE,
};
use crate::domain::voice::resolve_voice;

/// 任务级错误
#[derive(Debug, Error)]
enum JobError {
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// Serverless 任务处理器
pub struct ServerlessHandler {
    engine_host: Arc<EngineHost>,
    packer: Arc<dyn AudioPackerPort>,
}

impl ServerlessHandler {
    pub fn new(engine_host: Arc<EngineHost>, packer: Arc<dyn AudioPackerPort>) -> Self {
        Self {
            engine_host,
            packer,
        }
    }

    /// 处理一个任务，任何失败都转换为 `{error}` 结果
    pub async fn handle(&self, job: serde_json::Value) -> JobOutput {
        match self.run(job).await {
            Ok(success) => JobOutput::Success(success),
            Err(e) => {
                tracing::error!(error = %e, "Serverless job failed");
                JobOutput::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn run(&self, job: serde_json::Value) -> Result<JobSuccess, JobError> {
        let job: ServerlessJob =
            serde_json::from_value(job).map_err(|e| JobError::InvalidJob(e.to_string()))?;
        let JobInput {
            text,
            speaker_id,
            language,
            output_format,
            ..
        } = job.input;

        let text = text
            .filter(|t| !t.is_empty())
            .ok_or(ApplicationError::MissingText)?;

        if output_format != OUTPUT_FORMAT_BASE64 {
            tracing::warn!(
                output_format = %output_format,
                "Unsupported output format, returning base64"
            );
        }

        // 首个任务承担冷启动
        self.engine_host.initialize().await?;

        let started = Instant::now();
        let voice = resolve_voice(&speaker_id, |_| None);
        let request = synthesis_request_for(&voice, &text, &language, SamplerParams::default());

        let samples = self.engine_host.synthesize(request).await?;
        let audio = self
            .packer
            .pack(&samples, OUTPUT_SAMPLE_RATE)
            .map_err(ApplicationError::from)?;

        let text_length = text.chars().count();
        tracing::info!(
            speaker = %voice.display_name(),
            text_length,
            samples = audio.sample_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Serverless job completed"
        );

        Ok(JobSuccess {
            audio_base64: base64::engine::general_purpose::STANDARD.encode(&audio.wav_data),
            duration_seconds: audio.duration_seconds(),
            sample_rate: audio.sample_rate,
            speaker: voice.display_name().to_string(),
            text_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{EngineError, EngineLoaderPort, SynthesisEnginePort};
    use crate::infrastructure::adapters::{inspect_wav, FakeEngineLoader, WavPacker};
    use async_trait::async_trait;
    use serde_json::json;
    use std::time::Duration;

    fn handler() -> (Arc<EngineHost>, ServerlessHandler) {
        let engine_host = Arc::new(EngineHost::new(
            Arc::new(FakeEngineLoader::default()),
            Duration::from_secs(5),
        ));
        let handler = ServerlessHandler::new(engine_host.clone(), Arc::new(WavPacker::new()));
        (engine_host, handler)
    }

    #[tokio::test]
    async fn test_job_returns_decodable_wav() {
        let (engine_host, handler) = handler();
        assert!(!engine_host.is_ready());

        let output = handler
            .handle(json!({"input": {"text": "hi", "speakerId": "aria"}}))
            .await;

        let JobOutput::Success(success) = output else {
            panic!("expected success, got {:?}", output);
        };
        assert_eq!(success.sample_rate, 22050);
        assert_eq!(success.speaker, "Claribel Dervla");
        assert_eq!(success.text_length, 2);
        assert!(success.duration_seconds > 0.0);

        let wav = base64::engine::general_purpose::STANDARD
            .decode(&success.audio_base64)
            .unwrap();
        let info = inspect_wav(&wav).unwrap();
        assert_eq!(info.sample_rate, 22050);
        assert_eq!(info.data_start + info.data_size, wav.len());

        // 引擎加载后保持就绪
        assert!(engine_host.is_ready());
    }

    #[tokio::test]
    async fn test_missing_text_returns_error() {
        let (engine_host, handler) = handler();

        for job in [json!({"input": {}}), json!({"input": {"text": ""}}), json!({})] {
            let output = handler.handle(job).await;
            assert_eq!(
                serde_json::to_value(&output).unwrap(),
                json!({"error": "No text provided"})
            );
        }
        // 文本校验先于冷启动
        assert!(!engine_host.is_ready());
    }

    #[tokio::test]
    async fn test_whitespace_text_is_synthesized() {
        let (_engine_host, handler) = handler();
        let output = handler.handle(json!({"input": {"text": "  "}})).await;

        let JobOutput::Success(success) = output else {
            panic!("expected success, got {:?}", output);
        };
        assert_eq!(success.text_length, 2);
        assert!(success.duration_seconds > 0.0);
    }

    #[tokio::test]
    async fn test_unknown_speaker_falls_back() {
        let (_engine_host, handler) = handler();
        let output = handler
            .handle(json!({"input": {"text": "hello", "speaker_id": "NOBODY"}}))
            .await;

        let JobOutput::Success(success) = output else {
            panic!("expected success");
        };
        assert_eq!(success.speaker, "Claribel Dervla");
    }

    #[tokio::test]
    async fn test_alias_resolves_to_preset() {
        let (_engine_host, handler) = handler();
        let output = handler
            .handle(json!({"input": {"text": "hello", "speakerId": "WILL", "outputFormat": "mp3"}}))
            .await;

        let JobOutput::Success(success) = output else {
            panic!("expected success");
        };
        assert_ne!(success.speaker, "Claribel Dervla");
    }

    struct MissingWeightsLoader;

    #[async_trait]
    impl EngineLoaderPort for MissingWeightsLoader {
        async fn load(&self) -> Result<Arc<dyn SynthesisEnginePort>, EngineError> {
            Err(EngineError::LoadFailed(
                "checkpoint /models/xtts_v2 missing".into(),
            ))
        }
    }

    #[tokio::test]
    async fn test_load_failure_reason_reported() {
        let engine_host = Arc::new(EngineHost::new(
            Arc::new(MissingWeightsLoader),
            Duration::from_secs(5),
        ));
        let handler = ServerlessHandler::new(engine_host.clone(), Arc::new(WavPacker::new()));

        let output = handler.handle(json!({"input": {"text": "hello"}})).await;
        let JobOutput::Failure { error } = output else {
            panic!("expected failure");
        };
        assert_eq!(
            error,
            "TTS model failed to load: checkpoint /models/xtts_v2 missing"
        );
        assert!(!engine_host.is_ready());
    }

    #[tokio::test]
    async fn test_malformed_job_returns_error() {
        let (_engine_host, handler) = handler();
        let output = handler.handle(json!({"input": {"text": 42}})).await;
        assert!(!output.is_success());
    }
}
