//! XTTS Gateway - 多语言语音合成网关
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 内置音色、别名、克隆音色与解析规则
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SynthesisEngine, EngineLoader, VoiceRegistry, VoiceSampleStore, AudioPacker）
//! - EngineHost: 引擎一次性加载、串行化调用、超时
//! - Commands: 合成语音、克隆/删除音色
//! - Queries: 音色列表、健康状态
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: /health、/voices、/tts、/clone
//! - Serverless: 单任务 JSON 处理器
//! - Memory: 音色注册表
//! - Adapters: 推理引擎客户端、WAV 封装、参考音频存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
