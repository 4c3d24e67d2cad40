//! In-Memory Voice Registry Implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::{
    RegistryError, StoreError, VoiceRegistryPort, VoiceSampleStorePort,
};
use crate::domain::voice::{
    builtin_voices, is_builtin, lookup_voice, resolve_voice, Voice, VoiceId,
};

/// 内存音色注册表
///
/// 内置音色固定不变；自定义音色由读写锁保护，
/// 写操作在持有写锁期间完成文件落盘，列表读取不会看到半写入的条目
pub struct InMemoryVoiceRegistry {
    builtins: Vec<Voice>,
    custom: RwLock<BTreeMap<VoiceId, Voice>>,
    store: Arc<dyn VoiceSampleStorePort>,
}

impl InMemoryVoiceRegistry {
    pub fn new(store: Arc<dyn VoiceSampleStorePort>) -> Self {
        Self {
            builtins: builtin_voices(),
            custom: RwLock::new(BTreeMap::new()),
            store,
        }
    }

    /// 从存储目录加载已有的克隆音色
    pub async fn load(&self) -> Result<usize, StoreError> {
        let samples = self.store.scan().await?;
        let mut custom = self.custom.write().await;

        for sample in samples {
            tracing::info!(voice_id = %sample.id, path = %sample.path.display(), "Loaded custom voice");
            custom.insert(sample.id.clone(), Voice::custom(sample.id, sample.path));
        }

        Ok(custom.len())
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl VoiceRegistryPort for InMemoryVoiceRegistry {
    async fn list(&self) -> Vec<Voice> {
        let custom = self.custom.read().await;
        self.builtins
            .iter()
            .chain(custom.values())
            .cloned()
            .collect()
    }

    async fn lookup(&self, id: &str) -> Option<Voice> {
        let custom = self.custom.read().await;
        lookup_voice(id, |key| custom.get(key).cloned())
    }

    async fn resolve(&self, id: &str) -> Voice {
        let custom = self.custom.read().await;
        resolve_voice(id, |key| custom.get(key).cloned())
    }

    async fn register(&self, name: &str, audio: &[u8]) -> Result<Voice, RegistryError> {
        let id = VoiceId::sanitize(name)?;
        if is_builtin(&id) {
            return Err(RegistryError::BuiltinProtected(id.to_string()));
        }

        let mut custom = self.custom.write().await;
        let path = self.store.save(&id, audio).await?;
        let voice = Voice::custom(id.clone(), path);

        if custom.insert(id.clone(), voice.clone()).is_some() {
            tracing::info!(voice_id = %id, "Custom voice overwritten");
        }

        Ok(voice)
    }

    async fn delete(&self, id: &str) -> Result<Voice, RegistryError> {
        let id = VoiceId::normalize(id);
        if is_builtin(&id) {
            return Err(RegistryError::BuiltinProtected(id.to_string()));
        }

        let mut custom = self.custom.write().await;
        let voice = custom
            .get(&id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        // 按 id 删除，连同同名的其他格式文件，避免重启后音色复活
        self.store.remove(&id).await?;
        custom.remove(&id);

        Ok(voice)
    }

    async fn custom_count(&self) -> usize {
        self.custom.read().await.len()
    }
}
