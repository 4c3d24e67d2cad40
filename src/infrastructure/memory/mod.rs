//! In-Memory Implementations
//!
//! 进程内状态：音色注册表

mod voice_registry;

pub use voice_registry::InMemoryVoiceRegistry;
