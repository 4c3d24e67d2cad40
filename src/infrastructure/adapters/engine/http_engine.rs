//! HTTP Synthesis Engine - 调用外部推理服务
//!
//! 实现 SynthesisEnginePort，模型本身运行在独立的推理进程中
//!
//! 推理服务 API:
//! POST {base_url}/load
//! Request: {"model": "xtts_v2", "device": "auto"}
//! Response: {"device": "cuda", "model": "xtts_v2", "cuda_available": true}
//!
//! POST {base_url}/synthesize
//! Request: {"text", "language", "speaker"} 或
//!          {"text", "language", "speaker_wav", "temperature", "length_penalty",
//!           "repetition_penalty", "top_k", "top_p"}
//! Response: little-endian f32 采样 (application/octet-stream)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    EngineError, EngineInfo, EngineLoaderPort, SamplerParams, SynthesisEnginePort,
    SynthesisRequest,
};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesizeHttpRequest<'a> {
    text: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker_wav: Option<String>,
    #[serde(flatten)]
    params: Option<SamplerParams>,
}

impl<'a> From<&'a SynthesisRequest> for SynthesizeHttpRequest<'a> {
    fn from(request: &'a SynthesisRequest) -> Self {
        match request {
            SynthesisRequest::Preset {
                text,
                speaker,
                language,
            } => Self {
                text: text.as_str(),
                language: language.as_str(),
                speaker: Some(speaker.as_str()),
                speaker_wav: None,
                params: None,
            },
            SynthesisRequest::Cloned {
                text,
                speaker_wav,
                language,
                params,
            } => Self {
                text: text.as_str(),
                language: language.as_str(),
                speaker: None,
                speaker_wav: Some(speaker_wav.to_string_lossy().into_owned()),
                params: Some(*params),
            },
        }
    }
}

/// 加载请求体
#[derive(Debug, Serialize)]
struct LoadHttpRequest<'a> {
    model: &'a str,
    device: &'a str,
}

/// 加载响应体
#[derive(Debug, Deserialize)]
struct LoadHttpResponse {
    device: String,
    model: String,
    #[serde(default)]
    cuda_available: bool,
}

/// HTTP 引擎配置
#[derive(Debug, Clone)]
pub struct HttpEngineConfig {
    /// 推理服务基础 URL
    pub base_url: String,
    /// 模型标识
    pub model: String,
    /// 设备偏好: auto / cuda / cpu
    pub device: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for HttpEngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            model: "xtts_v2".to_string(),
            device: "auto".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpEngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn map_request_error(e: reqwest::Error) -> EngineError {
    if e.is_timeout() {
        EngineError::NetworkError(format!("Inference service timed out: {}", e))
    } else if e.is_connect() {
        EngineError::NetworkError(format!("Cannot connect to inference service: {}", e))
    } else {
        EngineError::NetworkError(e.to_string())
    }
}

/// 解析 little-endian f32 采样
fn decode_samples(body: &[u8]) -> Result<Vec<f32>, EngineError> {
    if body.len() % 4 != 0 {
        return Err(EngineError::InvalidResponse(format!(
            "Sample payload length {} is not a multiple of 4",
            body.len()
        )));
    }
    Ok(body
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// HTTP 推理引擎
pub struct HttpSynthesisEngine {
    client: Client,
    config: HttpEngineConfig,
    info: EngineInfo,
}

#[async_trait]
impl SynthesisEnginePort for HttpSynthesisEngine {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<f32>, EngineError> {
        let body = SynthesizeHttpRequest::from(&request);
        let url = self.config.endpoint("synthesize");

        tracing::debug!(
            url = %url,
            text_len = body.text.len(),
            cloned = body.speaker_wav.is_some(),
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EngineError::InvalidResponse(format!("Failed to read samples: {}", e)))?;

        let samples = decode_samples(&bytes)?;
        tracing::debug!(samples = samples.len(), "Synthesis response received");
        Ok(samples)
    }

    fn info(&self) -> EngineInfo {
        self.info.clone()
    }
}

/// HTTP 引擎加载器
///
/// 请求推理服务加载模型，成功后返回可用引擎
pub struct HttpEngineLoader {
    config: HttpEngineConfig,
}

impl HttpEngineLoader {
    pub fn new(config: HttpEngineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EngineLoaderPort for HttpEngineLoader {
    async fn load(&self) -> Result<Arc<dyn SynthesisEnginePort>, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| EngineError::LoadFailed(e.to_string()))?;

        let url = self.config.endpoint("load");
        tracing::info!(url = %url, model = %self.config.model, device = %self.config.device, "Requesting model load");

        let response = client
            .post(&url)
            .json(&LoadHttpRequest {
                model: &self.config.model,
                device: &self.config.device,
            })
            .send()
            .await
            .map_err(|e| EngineError::LoadFailed(map_request_error(e).to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::LoadFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let loaded: LoadHttpResponse = response
            .json()
            .await
            .map_err(|e| EngineError::LoadFailed(format!("Invalid load response: {}", e)))?;

        Ok(Arc::new(HttpSynthesisEngine {
            client,
            config: self.config.clone(),
            info: EngineInfo {
                device: loaded.device,
                model: loaded.model,
                cuda_available: loaded.cuda_available,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_default() {
        let config = HttpEngineConfig::default();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpEngineConfig::new("http://gpu-box:9000/").with_timeout(60);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.endpoint("load"), "http://gpu-box:9000/load");
    }

    #[test]
    fn test_preset_body_omits_sampler_params() {
        let request = SynthesisRequest::Preset {
            text: "hello".into(),
            speaker: "Gracie Wise".into(),
            language: "en".into(),
        };
        let body = serde_json::to_value(SynthesizeHttpRequest::from(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"text": "hello", "language": "en", "speaker": "Gracie Wise"})
        );
    }

    #[test]
    fn test_cloned_body_carries_sampler_params() {
        let request = SynthesisRequest::Cloned {
            text: "hello".into(),
            speaker_wav: PathBuf::from("/voices/me.wav"),
            language: "fr".into(),
            params: SamplerParams::default(),
        };
        let body = serde_json::to_value(SynthesizeHttpRequest::from(&request)).unwrap();
        assert_eq!(body["speaker_wav"], "/voices/me.wav");
        assert_eq!(body["top_k"], 50);
        assert!(body.get("speaker").is_none());
    }

    #[test]
    fn test_decode_samples() {
        let mut body = Vec::new();
        body.extend_from_slice(&0.5f32.to_le_bytes());
        body.extend_from_slice(&(-1.0f32).to_le_bytes());
        assert_eq!(decode_samples(&body).unwrap(), vec![0.5, -1.0]);
        assert!(decode_samples(&[0, 1, 2]).is_err());
    }
}
