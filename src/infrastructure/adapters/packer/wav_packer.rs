//! WAV Packer - 基于 hound 的 PCM 封装
//!
//! 浮点采样 -> 峰值归一化 -> 16-bit PCM -> 单声道 WAV

use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

use crate::application::ports::{AudioPackerPort, PackError, PackedAudio, WavInfo};

const WAV_HEADER_LEN: usize = 44;

/// WAV 封装器
#[derive(Debug, Clone, Copy, Default)]
pub struct WavPacker;

impl WavPacker {
    pub fn new() -> Self {
        Self
    }

    /// 峰值归一化并量化为 i16
    ///
    /// 与浮点转整型相同：向零截断，超界饱和
    fn quantize(samples: &[f32]) -> Result<Vec<i16>, PackError> {
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(PackError::InvalidInput(
                "Samples contain non-finite values".to_string(),
            ));
        }

        let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
        if peak == 0.0 {
            return Err(PackError::EmptyAudio);
        }

        let peak = peak as f64;
        Ok(samples
            .iter()
            .map(|&s| ((s as f64 / peak) * 32767.0) as i16)
            .collect())
    }
}

impl AudioPackerPort for WavPacker {
    fn pack(&self, samples: &[f32], sample_rate: u32) -> Result<PackedAudio, PackError> {
        let pcm = Self::quantize(samples)?;

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + pcm.len() * 2));
        {
            let mut writer = WavWriter::new(&mut cursor, spec)
                .map_err(|e| PackError::EncodingError(e.to_string()))?;
            for sample in &pcm {
                writer
                    .write_sample(*sample)
                    .map_err(|e| PackError::EncodingError(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| PackError::EncodingError(e.to_string()))?;
        }

        Ok(PackedAudio {
            wav_data: cursor.into_inner(),
            sample_count: pcm.len(),
            sample_rate,
        })
    }
}

/// 解析 WAV 文件头（RIFF / fmt / data chunk）
pub fn inspect_wav(data: &[u8]) -> Result<WavInfo, PackError> {
    if data.len() < WAV_HEADER_LEN {
        return Err(PackError::InvalidInput("WAV data too short".to_string()));
    }

    // 验证 RIFF 头
    if &data[0..4] != b"RIFF" {
        return Err(PackError::InvalidInput(
            "Invalid WAV: missing RIFF header".to_string(),
        ));
    }

    // 验证 WAVE 标识
    if &data[8..12] != b"WAVE" {
        return Err(PackError::InvalidInput(
            "Invalid WAV: missing WAVE identifier".to_string(),
        ));
    }

    let riff_size = read_u32(data, 4);

    let mut pos = 12;
    let mut fmt: Option<[u8; 16]> = None;
    let mut data_chunk: Option<(usize, usize)> = None;

    while pos + 8 <= data.len() {
        let chunk_id = &data[pos..pos + 4];
        let chunk_size = read_u32(data, pos + 4) as usize;

        match chunk_id {
            b"fmt " => {
                if chunk_size < 16 || pos + 8 + 16 > data.len() {
                    return Err(PackError::InvalidInput(
                        "Invalid fmt chunk size".to_string(),
                    ));
                }
                let mut raw = [0u8; 16];
                raw.copy_from_slice(&data[pos + 8..pos + 24]);
                fmt = Some(raw);
            }
            b"data" => {
                data_chunk = Some((pos + 8, chunk_size));
                break;
            }
            _ => {}
        }

        pos += 8 + chunk_size;
        // 对齐到偶数字节
        if chunk_size % 2 != 0 {
            pos += 1;
        }
    }

    let fmt = fmt
        .ok_or_else(|| PackError::InvalidInput("Invalid WAV: missing fmt chunk".to_string()))?;
    let (data_start, data_size) = data_chunk
        .ok_or_else(|| PackError::InvalidInput("Invalid WAV: missing data chunk".to_string()))?;

    Ok(WavInfo {
        audio_format: u16::from_le_bytes([fmt[0], fmt[1]]),
        channels: u16::from_le_bytes([fmt[2], fmt[3]]),
        sample_rate: read_u32(&fmt, 4),
        byte_rate: read_u32(&fmt, 8),
        block_align: u16::from_le_bytes([fmt[12], fmt[13]]),
        bits_per_sample: u16::from_le_bytes([fmt[14], fmt[15]]),
        riff_size,
        data_start,
        data_size,
    })
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::OUTPUT_SAMPLE_RATE;

    fn pcm_of(packed: &PackedAudio) -> Vec<i16> {
        let info = inspect_wav(&packed.wav_data).unwrap();
        packed.wav_data[info.data_start..info.data_start + info.data_size]
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect()
    }

    #[test]
    fn test_header_matches_payload() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.01).sin() * 3.0).collect();
        let packed = WavPacker::new().pack(&samples, OUTPUT_SAMPLE_RATE).unwrap();
        let info = inspect_wav(&packed.wav_data).unwrap();

        assert_eq!(info.audio_format, 1);
        assert_eq!(info.channels, 1);
        assert_eq!(info.bits_per_sample, 16);
        assert_eq!(info.sample_rate, 22050);
        assert_eq!(info.byte_rate, 22050 * 2);
        assert_eq!(info.block_align, 2);
        assert_eq!(info.data_size, 2 * samples.len());
        assert_eq!(info.data_start + info.data_size, packed.wav_data.len());
        assert_eq!(info.riff_size as usize, packed.wav_data.len() - 8);
        assert_eq!(packed.sample_count, 1000);
    }

    #[test]
    fn test_peak_normalization() {
        let packed = WavPacker::new()
            .pack(&[0.25, -0.5, 0.125, 0.0], OUTPUT_SAMPLE_RATE)
            .unwrap();
        assert_eq!(pcm_of(&packed), vec![16383, -32767, 8191, 0]);
    }

    #[test]
    fn test_quantization_truncates_toward_zero() {
        // 0.3 * 32767 = 9830.1, -0.3 * 32767 = -9830.1
        let packed = WavPacker::new()
            .pack(&[1.0, 0.3, -0.3], OUTPUT_SAMPLE_RATE)
            .unwrap();
        assert_eq!(pcm_of(&packed), vec![32767, 9830, -9830]);
    }

    #[test]
    fn test_empty_and_silent_input_rejected() {
        let packer = WavPacker::new();
        assert!(matches!(
            packer.pack(&[], OUTPUT_SAMPLE_RATE),
            Err(PackError::EmptyAudio)
        ));
        assert!(matches!(
            packer.pack(&[0.0; 64], OUTPUT_SAMPLE_RATE),
            Err(PackError::EmptyAudio)
        ));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let packer = WavPacker::new();
        for bad in [f32::INFINITY, f32::NAN] {
            let result = packer.pack(&[0.5, bad], OUTPUT_SAMPLE_RATE);
            assert!(matches!(result, Err(PackError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_duration() {
        let packed = WavPacker::new()
            .pack(&vec![0.1; 22050 * 2], OUTPUT_SAMPLE_RATE)
            .unwrap();
        assert!((packed.duration_seconds() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        assert!(inspect_wav(b"not a wav").is_err());
        let mut bogus = vec![0u8; 64];
        bogus[0..4].copy_from_slice(b"RIFX");
        assert!(inspect_wav(&bogus).is_err());
    }
}
