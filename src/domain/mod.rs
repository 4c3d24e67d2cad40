//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Voice Context: 音色表、名称清洗与解析

pub mod voice;
