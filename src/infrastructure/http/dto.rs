//! Data Transfer Objects
//!
//! 输出统一 snake_case，输入同时接受 camelCase 别名

use serde::{Deserialize, Serialize};

use crate::application::commands::{DEFAULT_LANGUAGE, DEFAULT_SPEAKER_ID};
use crate::application::{HealthReport, SamplerParams, VoiceSummary};
use crate::domain::voice::VoiceKind;

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub device: String,
    pub model: String,
    pub cuda_available: bool,
    pub voices_loaded: usize,
    pub model_loaded: bool,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: "ok",
            device: report.device,
            model: report.model,
            cuda_available: report.cuda_available,
            voices_loaded: report.voices_loaded,
            model_loaded: report.model_loaded,
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VoiceKind,
    pub language: String,
}

impl From<VoiceSummary> for VoiceItem {
    fn from(summary: VoiceSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            kind: summary.kind,
            language: summary.language,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    pub voices: Vec<VoiceItem>,
}

#[derive(Debug, Serialize)]
pub struct CloneVoiceResponse {
    pub success: bool,
    pub speaker_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteVoiceResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// TTS DTOs
// ============================================================================

fn default_speaker_id() -> String {
    DEFAULT_SPEAKER_ID.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_temperature() -> f32 {
    SamplerParams::default().temperature
}

fn default_length_penalty() -> f32 {
    SamplerParams::default().length_penalty
}

fn default_repetition_penalty() -> f32 {
    SamplerParams::default().repetition_penalty
}

fn default_top_k() -> u32 {
    SamplerParams::default().top_k
}

fn default_top_p() -> f32 {
    SamplerParams::default().top_p
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    /// 缺失与空字符串同样视为缺少文本
    #[serde(default)]
    pub text: String,

    #[serde(default = "default_speaker_id", alias = "speakerId")]
    pub speaker_id: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_length_penalty", alias = "lengthPenalty")]
    pub length_penalty: f32,

    #[serde(default = "default_repetition_penalty", alias = "repetitionPenalty")]
    pub repetition_penalty: f32,

    #[serde(default = "default_top_k", alias = "topK")]
    pub top_k: u32,

    #[serde(default = "default_top_p", alias = "topP")]
    pub top_p: f32,
}

impl TtsRequest {
    pub fn params(&self) -> SamplerParams {
        SamplerParams {
            temperature: self.temperature,
            length_penalty: self.length_penalty,
            repetition_penalty: self.repetition_penalty,
            top_k: self.top_k,
            top_p: self.top_p,
        }
    }
}
