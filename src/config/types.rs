//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 推理引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 音色配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 推理引擎后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineBackend {
    /// 外部推理服务
    #[default]
    Http,
    /// 本地正弦波，开发测试用
    Fake,
}

/// 推理引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub backend: EngineBackend,

    /// 推理服务基础 URL
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// 模型标识
    #[serde(default = "default_model")]
    pub model: String,

    /// 设备偏好: auto / cuda / cpu
    #[serde(default = "default_device")]
    pub device: String,

    /// 单次推理超时时间（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,

    /// 启动时加载模型，加载失败则退出
    #[serde(default = "default_eager_load")]
    pub eager_load: bool,
}

fn default_engine_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_model() -> String {
    "xtts_v2".to_string()
}

fn default_device() -> String {
    "auto".to_string()
}

fn default_engine_timeout() -> u64 {
    120
}

fn default_eager_load() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: EngineBackend::default(),
            url: default_engine_url(),
            model: default_model(),
            device: default_device(),
            timeout_secs: default_engine_timeout(),
            eager_load: default_eager_load(),
        }
    }
}

/// 音色配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 克隆音色参考音频目录
    #[serde(default = "default_voices_dir")]
    pub dir: PathBuf,

    /// 未知音色报 404 而不是回退到默认音色
    #[serde(default)]
    pub strict_resolution: bool,

    /// 上传文件最大大小（字节），默认 10MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("data/voices")
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            dir: default_voices_dir(),
            strict_resolution: false,
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.engine.backend, EngineBackend::Http);
        assert_eq!(config.engine.model, "xtts_v2");
        assert_eq!(config.voices.dir, PathBuf::from("data/voices"));
        assert!(!config.voices.strict_resolution);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_backend_deserialize() {
        let config: EngineConfig = serde_json::from_str(r#"{"backend": "fake"}"#).unwrap();
        assert_eq!(config.backend, EngineBackend::Fake);
        assert_eq!(config.timeout_secs, 120);
    }
}
