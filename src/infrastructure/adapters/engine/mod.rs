//! Engine Adapter - 推理引擎实现

mod fake_engine;
mod http_engine;

use std::sync::Arc;

use crate::application::EngineLoaderPort;
use crate::config::{EngineBackend, EngineConfig};

pub use fake_engine::{FakeEngineConfig, FakeEngineLoader, FakeSynthesisEngine};
pub use http_engine::*;

/// 按配置选择引擎加载器
pub fn create_engine_loader(config: &EngineConfig) -> Arc<dyn EngineLoaderPort> {
    match config.backend {
        EngineBackend::Http => {
            let http_config = HttpEngineConfig {
                base_url: config.url.clone(),
                model: config.model.clone(),
                device: config.device.clone(),
                timeout_secs: config.timeout_secs,
            };
            Arc::new(HttpEngineLoader::new(http_config))
        }
        EngineBackend::Fake => Arc::new(FakeEngineLoader::new(FakeEngineConfig {
            model: config.model.clone(),
            ..Default::default()
        })),
    }
}
