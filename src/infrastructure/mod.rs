//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现，以及 HTTP / Serverless 两个前端

pub mod adapters;
pub mod http;
pub mod memory;
pub mod serverless;

pub use memory::InMemoryVoiceRegistry;
pub use serverless::ServerlessHandler;
