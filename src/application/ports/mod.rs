//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_packer;
mod synthesis_engine;
mod voice_registry;
mod voice_store;

pub use audio_packer::{AudioPackerPort, PackError, PackedAudio, WavInfo, OUTPUT_SAMPLE_RATE};
pub use synthesis_engine::{
    EngineError, EngineInfo, EngineLoaderPort, SamplerParams, SynthesisEnginePort,
    SynthesisRequest,
};
pub use voice_registry::{RegistryError, VoiceRegistryPort};
pub use voice_store::{StoreError, StoredSample, VoiceSampleStorePort};
