//! Serverless Job Contract
//!
//! 输入 `{"input": {...}}`，输出成功对象或 `{"error": "..."}`

use serde::{Deserialize, Serialize};

use crate::application::commands::DEFAULT_LANGUAGE;
use crate::application::SamplerParams;

/// Serverless 前端的默认音色（别名）
pub const DEFAULT_JOB_SPEAKER: &str = "aria";

/// 唯一支持的输出格式
pub const OUTPUT_FORMAT_BASE64: &str = "base64";

fn default_speaker_id() -> String {
    DEFAULT_JOB_SPEAKER.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_temperature() -> f32 {
    SamplerParams::default().temperature
}

fn default_output_format() -> String {
    OUTPUT_FORMAT_BASE64.to_string()
}

/// 任务外层
#[derive(Debug, Default, Deserialize)]
pub struct ServerlessJob {
    #[serde(default)]
    pub input: JobInput,
}

/// 任务输入
#[derive(Debug, Deserialize)]
pub struct JobInput {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default = "default_speaker_id", alias = "speakerId")]
    pub speaker_id: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// 内置音色路径不使用，仅为兼容保留
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_output_format", alias = "outputFormat")]
    pub output_format: String,
}

impl Default for JobInput {
    fn default() -> Self {
        Self {
            text: None,
            speaker_id: default_speaker_id(),
            language: default_language(),
            temperature: default_temperature(),
            output_format: default_output_format(),
        }
    }
}

/// 成功结果
#[derive(Debug, Clone, Serialize)]
pub struct JobSuccess {
    pub audio_base64: String,
    pub duration_seconds: f64,
    pub sample_rate: u32,
    /// 实际使用的预设名称
    pub speaker: String,
    pub text_length: usize,
}

/// 任务结果，错误从不越过处理器边界
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JobOutput {
    Success(JobSuccess),
    Failure { error: String },
}

impl JobOutput {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutput::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_defaults() {
        let job: ServerlessJob = serde_json::from_str(r#"{"input": {"text": "hi"}}"#).unwrap();
        assert_eq!(job.input.text.as_deref(), Some("hi"));
        assert_eq!(job.input.speaker_id, "aria");
        assert_eq!(job.input.language, "en");
        assert_eq!(job.input.output_format, "base64");
    }

    #[test]
    fn test_job_accepts_camel_case() {
        let job: ServerlessJob = serde_json::from_str(
            r#"{"input": {"text": "hi", "speakerId": "will", "outputFormat": "mp3"}}"#,
        )
        .unwrap();
        assert_eq!(job.input.speaker_id, "will");
        assert_eq!(job.input.output_format, "mp3");
    }

    #[test]
    fn test_missing_input_uses_defaults() {
        let job: ServerlessJob = serde_json::from_str("{}").unwrap();
        assert!(job.input.text.is_none());
    }

    #[test]
    fn test_failure_serializes_as_error_object() {
        let output = JobOutput::Failure {
            error: "No text provided".into(),
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({"error": "No text provided"})
        );
    }
}
