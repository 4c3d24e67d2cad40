//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::VoiceError;

/// 音色唯一标识
///
/// 不变量:
/// - 总是小写
/// - 经 `sanitize` 创建时只包含字母数字、`_`、`-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoiceId(String);

impl VoiceId {
    /// 仅做大小写归一，用于查找
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    /// 清洗用户输入的音色名称
    ///
    /// 过滤掉字母数字、`_`、`-` 之外的字符后转小写，结果为空则报错
    pub fn sanitize(raw: &str) -> Result<Self, VoiceError> {
        let safe: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect::<String>()
            .to_lowercase();

        if safe.is_empty() {
            return Err(VoiceError::InvalidName(raw.to_string()));
        }
        Ok(Self(safe))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceKind {
    /// 引擎内置预设
    Builtin,
    /// 用户上传参考音频克隆
    Custom,
}

impl VoiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Custom => "custom",
        }
    }
}

/// 合成时传给引擎的音色参考
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceReference {
    /// 内置预设名称（如 "Claribel Dervla"）
    Preset(String),
    /// 参考音频文件路径
    Sample(PathBuf),
}

impl VoiceReference {
    pub fn kind(&self) -> VoiceKind {
        match self {
            Self::Preset(_) => VoiceKind::Builtin,
            Self::Sample(_) => VoiceKind::Custom,
        }
    }

    pub fn sample_path(&self) -> Option<&Path> {
        match self {
            Self::Sample(path) => Some(path),
            Self::Preset(_) => None,
        }
    }
}

/// 参考音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Wav,
    Mp3,
    Flac,
    Ogg,
}

impl SampleFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// 从路径扩展名推断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
        }
    }
}
