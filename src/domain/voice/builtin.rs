//! Voice Context - 内置音色表与解析规则

use super::{Voice, VoiceId};

/// 内置音色 (id, 引擎预设名称)，按声明顺序列出
pub const BUILTIN_VOICES: &[(&str, &str)] = &[
    ("female_1", "Claribel Dervla"),
    ("female_2", "Daisy Studious"),
    ("female_3", "Gracie Wise"),
    ("female_4", "Tammie Ema"),
    ("male_1", "Alison Dietlinde"),
    ("male_2", "Ana Florence"),
    ("male_3", "Annmarie Nele"),
    ("male_4", "Asya Anara"),
];

/// 别名 -> 内置音色 id（兼容旧平台的音色名）
pub const VOICE_ALIASES: &[(&str, &str)] = &[
    ("aria", "female_1"),
    ("lily", "female_2"),
    ("charlotte", "female_3"),
    ("gigi", "female_4"),
    ("daniel", "male_1"),
    ("callum", "male_2"),
    ("liam", "male_3"),
    ("will", "male_4"),
];

/// 找不到音色时的回退（第一个女声）
pub const DEFAULT_VOICE_ID: &str = "female_1";

/// 全部内置音色
pub fn builtin_voices() -> Vec<Voice> {
    BUILTIN_VOICES
        .iter()
        .map(|(id, preset)| Voice::builtin(VoiceId::normalize(id), *preset))
        .collect()
}

/// 是否为内置音色 id（别名不算）
pub fn is_builtin(id: &VoiceId) -> bool {
    BUILTIN_VOICES.iter().any(|(b, _)| *b == id.as_str())
}

/// 按内置 id 或别名查找
pub fn find_builtin(id: &VoiceId) -> Option<Voice> {
    let key = VOICE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == id.as_str())
        .map(|(_, target)| *target)
        .unwrap_or(id.as_str());

    BUILTIN_VOICES
        .iter()
        .find(|(b, _)| *b == key)
        .map(|(b, preset)| Voice::builtin(VoiceId::normalize(b), *preset))
}

pub fn default_voice() -> Voice {
    let (id, preset) = BUILTIN_VOICES[0];
    debug_assert_eq!(id, DEFAULT_VOICE_ID);
    Voice::builtin(VoiceId::normalize(id), preset)
}

/// 严格查找: 自定义音色 > 内置 id > 别名
///
/// `find_custom` 由调用方提供（Serverless 前端没有自定义音色）
pub fn lookup_voice<F>(requested: &str, find_custom: F) -> Option<Voice>
where
    F: FnOnce(&VoiceId) -> Option<Voice>,
{
    let id = VoiceId::normalize(requested);
    find_custom(&id).or_else(|| find_builtin(&id))
}

/// 宽松解析: 查不到时静默回退到默认音色，永不失败
pub fn resolve_voice<F>(requested: &str, find_custom: F) -> Voice
where
    F: FnOnce(&VoiceId) -> Option<Voice>,
{
    lookup_voice(requested, find_custom).unwrap_or_else(|| {
        tracing::debug!(requested = %requested, "Unknown voice, falling back to default");
        default_voice()
    })
}
