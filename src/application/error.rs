//! 应用层错误定义
//!
//! 统一的命令/查询错误类型，前端（HTTP / Serverless）各自映射到响应

use thiserror::Error;

use crate::application::ports::{EngineError, PackError, RegistryError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 文本为空或缺失
    #[error("No text provided")]
    MissingText,

    /// 音色名称清洗后为空
    #[error("Invalid voice name")]
    InvalidVoiceName(String),

    /// 音色不存在
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// 内置音色不可删除/覆盖
    #[error("Cannot modify built-in voice '{0}'")]
    BuiltinProtected(String),

    /// 上传的参考音频无效
    #[error("Invalid audio sample: {0}")]
    InvalidAudio(String),

    /// 模型尚未加载
    #[error("TTS model not loaded")]
    AdapterUnavailable,

    /// 模型加载失败，保留加载器给出的原因
    #[error("TTS model failed to load: {0}")]
    AdapterLoadFailed(String),

    /// 推理引擎异常
    #[error("{0}")]
    AdapterFailure(String),

    /// 归一化输入为空或全零
    #[error("Synthesis produced empty audio")]
    EmptyAudio,

    /// 推理超时
    #[error("Synthesis timed out after {0}s")]
    Timeout(u64),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// 是否为调用方输入错误
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingText
                | Self::InvalidVoiceName(_)
                | Self::VoiceNotFound(_)
                | Self::BuiltinProtected(_)
                | Self::InvalidAudio(_)
        )
    }
}

impl From<RegistryError> for ApplicationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidName(name) => Self::InvalidVoiceName(name),
            RegistryError::NotFound(id) => Self::VoiceNotFound(id),
            RegistryError::BuiltinProtected(id) => Self::BuiltinProtected(id),
            RegistryError::InvalidAudio(msg) => Self::InvalidAudio(msg),
            RegistryError::StorageError(msg) => Self::StorageError(msg),
        }
    }
}

impl From<EngineError> for ApplicationError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::LoadFailed(msg) => {
                tracing::error!(error = %msg, "Engine load failed");
                Self::AdapterLoadFailed(msg)
            }
            other => Self::AdapterFailure(other.to_string()),
        }
    }
}

impl From<PackError> for ApplicationError {
    fn from(err: PackError) -> Self {
        match err {
            PackError::EmptyAudio => Self::EmptyAudio,
            other => Self::InternalError(other.to_string()),
        }
    }
}
