//! Voice Sample Store Port - 克隆音色参考音频存储
//!
//! 一个音色一个文件，文件名去掉扩展名即音色 id。
//! 目录里可能有多个文件清洗后得到同一个 id（`Bob.mp3` 与 `bob.wav`），
//! 存储按 id 而不是按单个文件处理这些同名文件

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::voice::VoiceId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Empty audio sample")]
    EmptySample,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err.to_string())
    }
}

/// 扫描到的参考音频
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSample {
    pub id: VoiceId,
    pub path: PathBuf,
}

#[async_trait]
pub trait VoiceSampleStorePort: Send + Sync {
    /// 音色 id 对应的确定性存储路径
    fn sample_path(&self, id: &VoiceId) -> PathBuf;

    /// 原子写入（先写临时文件再 rename），同 id 覆盖，
    /// 并清理同 id 的其他扩展名文件
    async fn save(&self, id: &VoiceId, data: &[u8]) -> Result<PathBuf, StoreError>;

    /// 删除 id 对应的全部文件，没有文件视为已删除
    async fn remove(&self, id: &VoiceId) -> Result<(), StoreError>;

    /// 扫描存储目录，每个 id 至多一条
    async fn scan(&self) -> Result<Vec<StoredSample>, StoreError>;
}
