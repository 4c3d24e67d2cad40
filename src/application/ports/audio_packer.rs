//! Audio Packer Port - 浮点采样 -> WAV 封装

use thiserror::Error;

/// 输出采样率（Hz）
pub const OUTPUT_SAMPLE_RATE: u32 = 22050;

/// 封装错误
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Audio is empty or silent, cannot normalize")]
    EmptyAudio,

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// 封装结果
#[derive(Debug, Clone)]
pub struct PackedAudio {
    /// 完整 WAV 文件字节
    pub wav_data: Vec<u8>,
    pub sample_count: usize,
    pub sample_rate: u32,
}

impl PackedAudio {
    /// 时长（秒）
    pub fn duration_seconds(&self) -> f64 {
        self.sample_count as f64 / self.sample_rate as f64
    }
}

/// WAV 头信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// RIFF chunk 声明的大小
    pub riff_size: u32,
    /// data chunk 起始偏移
    pub data_start: usize,
    /// data chunk 声明的大小
    pub data_size: usize,
}

/// Audio Packer Port
pub trait AudioPackerPort: Send + Sync {
    /// 峰值归一化 -> 16-bit PCM -> 单声道 WAV
    fn pack(&self, samples: &[f32], sample_rate: u32) -> Result<PackedAudio, PackError>;
}
