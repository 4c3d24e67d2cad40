//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 内置音色表与别名
//! - 音色名称清洗
//! - 音色解析（自定义 > 内置 > 别名 > 默认）

mod aggregate;
mod builtin;
mod errors;
mod value_objects;

pub use aggregate::{Voice, VOICE_LANGUAGE};
pub use builtin::{
    builtin_voices, default_voice, find_builtin, is_builtin, lookup_voice, resolve_voice,
    BUILTIN_VOICES, DEFAULT_VOICE_ID, VOICE_ALIASES,
};
pub use errors::VoiceError;
pub use value_objects::{SampleFormat, VoiceId, VoiceKind, VoiceReference};
