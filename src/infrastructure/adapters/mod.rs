//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod engine;
pub mod packer;
pub mod storage;

pub use engine::*;
pub use packer::*;
pub use storage::*;
