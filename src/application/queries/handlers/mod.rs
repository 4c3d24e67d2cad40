//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod health_handlers;
mod voice_handlers;

pub use health_handlers::*;
pub use voice_handlers::*;
