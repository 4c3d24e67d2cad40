//! Voice Registry Port - 音色注册表
//!
//! 进程内的 id -> Voice 映射，内置音色不可变，自定义音色可增删

use async_trait::async_trait;
use thiserror::Error;

use super::StoreError;
use crate::domain::voice::{Voice, VoiceError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid voice name: {0:?}")]
    InvalidName(String),

    #[error("Voice not found: {0}")]
    NotFound(String),

    #[error("Cannot modify built-in voice: {0}")]
    BuiltinProtected(String),

    #[error("Invalid audio sample: {0}")]
    InvalidAudio(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<VoiceError> for RegistryError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::InvalidName(name) => RegistryError::InvalidName(name),
            VoiceError::NotFound(id) => RegistryError::NotFound(id),
            VoiceError::BuiltinProtected(id) => RegistryError::BuiltinProtected(id),
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptySample => RegistryError::InvalidAudio(err.to_string()),
            StoreError::IoError(msg) => RegistryError::StorageError(msg),
        }
    }
}

#[async_trait]
pub trait VoiceRegistryPort: Send + Sync {
    /// 内置音色（声明顺序）在前，自定义音色在后
    async fn list(&self) -> Vec<Voice>;

    /// 严格查找，不回退
    async fn lookup(&self, id: &str) -> Option<Voice>;

    /// 宽松解析，未知 id 回退到默认音色
    async fn resolve(&self, id: &str) -> Voice;

    /// 注册（或覆盖）克隆音色，返回最终音色
    async fn register(&self, name: &str, audio: &[u8]) -> Result<Voice, RegistryError>;

    /// 删除克隆音色及其参考音频
    async fn delete(&self, id: &str) -> Result<Voice, RegistryError>;

    /// 自定义音色数量
    async fn custom_count(&self) -> usize;
}
