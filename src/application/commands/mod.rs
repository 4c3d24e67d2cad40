//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：合成语音、克隆/删除音色

mod synthesis_commands;
mod voice_commands;

pub mod handlers;

pub use synthesis_commands::*;
pub use voice_commands::*;
