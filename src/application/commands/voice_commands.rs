//! Voice Commands

/// 克隆音色命令
#[derive(Debug, Clone)]
pub struct CloneVoice {
    pub name: String,
    pub audio: Vec<u8>,
}

/// 删除音色命令
#[derive(Debug, Clone)]
pub struct DeleteVoice {
    pub voice_id: String,
}
