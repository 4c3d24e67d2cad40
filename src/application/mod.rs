//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（推理引擎、音色注册表、参考音频存储、WAV 封装）
//! - engine_host: 引擎一次性加载 + 串行化 + 超时
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod engine_host;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    CloneVoice,
    DeleteVoice,
    SynthesizeSpeech,
    // Handlers
    handlers::{
        synthesis_request_for, CloneVoiceHandler, DeleteVoiceHandler, SynthesizeSpeechHandler,
        SynthesizeSpeechResponse,
    },
};

pub use engine_host::EngineHost;
pub use error::ApplicationError;

pub use ports::{
    // Audio packer
    AudioPackerPort,
    PackError,
    PackedAudio,
    WavInfo,
    OUTPUT_SAMPLE_RATE,
    // Synthesis engine
    EngineError,
    EngineInfo,
    EngineLoaderPort,
    SamplerParams,
    SynthesisEnginePort,
    SynthesisRequest,
    // Voice registry & store
    RegistryError,
    StoreError,
    StoredSample,
    VoiceRegistryPort,
    VoiceSampleStorePort,
};

pub use queries::{
    GetHealth,
    ListVoices,
    // Handlers
    handlers::{GetHealthHandler, HealthReport, ListVoicesHandler, VoiceSummary},
};
