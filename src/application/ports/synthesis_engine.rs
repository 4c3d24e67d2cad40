//! Synthesis Engine Port - TTS 推理引擎抽象
//!
//! 推理引擎是外部黑盒，这里只定义调用契约，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Model load failed: {0}")]
    LoadFailed(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 采样参数
///
/// 只在克隆音色路径上转发给引擎，内置音色使用引擎默认值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplerParams {
    pub temperature: f32,
    pub length_penalty: f32,
    pub repetition_penalty: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            length_penalty: 1.0,
            repetition_penalty: 2.0,
            top_k: 50,
            top_p: 0.85,
        }
    }
}

/// 合成请求
///
/// 两种调用方式对应引擎的两种合成模式，不能合并:
/// - `Preset`: 内置音色，只传预设名称和语言
/// - `Cloned`: 克隆音色，传参考音频路径和完整采样参数
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisRequest {
    Preset {
        text: String,
        speaker: String,
        language: String,
    },
    Cloned {
        text: String,
        speaker_wav: PathBuf,
        language: String,
        params: SamplerParams,
    },
}

impl SynthesisRequest {
    pub fn text(&self) -> &str {
        match self {
            Self::Preset { text, .. } | Self::Cloned { text, .. } => text,
        }
    }

    pub fn language(&self) -> &str {
        match self {
            Self::Preset { language, .. } | Self::Cloned { language, .. } => language,
        }
    }
}

/// 引擎运行信息（健康检查展示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    pub device: String,
    pub model: String,
    pub cuda_available: bool,
}

/// Synthesis Engine Port
///
/// 不保证并发安全，调用方必须串行化
#[async_trait]
pub trait SynthesisEnginePort: Send + Sync {
    /// 执行一次合成，返回任意幅度的浮点采样（22050 Hz）
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<f32>, EngineError>;

    fn info(&self) -> EngineInfo;
}

/// 模型加载端口
///
/// 加载代价高，每个进程只应调用一次
#[async_trait]
pub trait EngineLoaderPort: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SynthesisEnginePort>, EngineError>;
}
