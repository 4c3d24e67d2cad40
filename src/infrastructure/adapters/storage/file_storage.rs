//! File Storage - 克隆音色参考音频的文件系统存储
//!
//! 实现 VoiceSampleStorePort trait，一个音色一个文件: `<dir>/<id>.wav`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{StoreError, StoredSample, VoiceSampleStorePort};
use crate::domain::voice::{is_builtin, SampleFormat, VoiceId};

/// 文件系统参考音频存储
pub struct FileVoiceSampleStore {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileVoiceSampleStore {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir).await?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn temp_path(&self, id: &VoiceId) -> PathBuf {
        self.base_dir
            .join(format!(".{}.{}.tmp", id, Uuid::new_v4().simple()))
    }

    /// 目录中所有可识别的参考音频文件（按路径排序）
    ///
    /// 跳过子目录、隐藏文件（含写入中的临时文件）和不支持的扩展名
    async fn sample_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(true, |name| name.starts_with('.'));
            if hidden || SampleFormat::from_path(&path).is_none() {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        Ok(paths)
    }

    /// 清洗后等于 `id` 的全部文件
    async fn files_for(&self, id: &VoiceId) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self
            .sample_files()
            .await?
            .into_iter()
            .filter(|path| voice_id_of(path).as_ref() == Some(id))
            .collect())
    }
}

/// 文件名（去扩展名）清洗后的音色 id
fn voice_id_of(path: &Path) -> Option<VoiceId> {
    let stem = path.file_stem().and_then(|s| s.to_str())?;
    VoiceId::sanitize(stem).ok()
}

/// 删除单个文件，文件不存在视为成功
async fn remove_file_if_exists(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl VoiceSampleStorePort for FileVoiceSampleStore {
    fn sample_path(&self, id: &VoiceId) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", id, SampleFormat::Wav.extension()))
    }

    async fn save(&self, id: &VoiceId, data: &[u8]) -> Result<PathBuf, StoreError> {
        if data.is_empty() {
            return Err(StoreError::EmptySample);
        }

        fs::create_dir_all(&self.base_dir).await?;

        // 先写临时文件再 rename，避免并发合成读到半个文件
        let temp_path = self.temp_path(id);
        let final_path = self.sample_path(id);

        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        // 同 id 的旧文件（其他扩展名或大小写）会在重启后重新冒出来
        for stale in self.files_for(id).await? {
            if stale != final_path && remove_file_if_exists(&stale).await? {
                tracing::info!(
                    voice_id = %id,
                    path = %stale.display(),
                    "Removed superseded voice sample"
                );
            }
        }

        tracing::debug!(
            voice_id = %id,
            path = %final_path.display(),
            size = data.len(),
            "Saved voice sample"
        );

        Ok(final_path)
    }

    async fn remove(&self, id: &VoiceId) -> Result<(), StoreError> {
        let mut removed = 0usize;
        for path in self.files_for(id).await? {
            if remove_file_if_exists(&path).await? {
                removed += 1;
            }
        }

        tracing::debug!(voice_id = %id, files = removed, "Deleted voice samples");
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<StoredSample>, StoreError> {
        let mut samples: Vec<StoredSample> = Vec::new();

        for path in self.sample_files().await? {
            let Some(id) = voice_id_of(&path) else {
                tracing::warn!(path = %path.display(), "Skipping voice sample with unusable name");
                continue;
            };
            if is_builtin(&id) {
                tracing::warn!(path = %path.display(), voice_id = %id, "Skipping voice sample that shadows a built-in voice");
                continue;
            }

            let Some(existing) = samples.iter_mut().find(|s| s.id == id) else {
                samples.push(StoredSample { id, path });
                continue;
            };

            // 同 id 多个文件：规范路径 `<id>.wav` 优先，否则保留排序靠前的
            let ignored = if path == self.sample_path(&id) {
                std::mem::replace(&mut existing.path, path)
            } else {
                path
            };
            tracing::warn!(
                voice_id = %id,
                kept = %existing.path.display(),
                ignored = %ignored.display(),
                "Duplicate voice sample, ignoring"
            );
        }

        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_overwrite() {
        let dir = tempdir().unwrap();
        let store = FileVoiceSampleStore::new(dir.path()).await.unwrap();
        let id = VoiceId::sanitize("narrator").unwrap();

        let path = store.save(&id, b"first").await.unwrap();
        assert_eq!(path, dir.path().join("narrator.wav"));
        store.save(&id, b"second").await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"second");
        // 没有残留临时文件
        let samples = store.scan().await.unwrap();
        assert_eq!(samples.len(), 1);
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_save_rejects_empty() {
        let dir = tempdir().unwrap();
        let store = FileVoiceSampleStore::new(dir.path()).await.unwrap();
        let id = VoiceId::sanitize("empty").unwrap();
        assert!(matches!(
            store.save(&id, b"").await,
            Err(StoreError::EmptySample)
        ));
    }

    async fn file_names(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileVoiceSampleStore::new(dir.path()).await.unwrap();
        let id = VoiceId::sanitize("ghost").unwrap();
        assert!(store.remove(&id).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_clears_every_file_of_the_id() {
        let dir = tempdir().unwrap();
        for name in ["Bob.mp3", "bob.flac", "b o b.wav", "bobby.wav"] {
            fs::write(dir.path().join(name), b"x").await.unwrap();
        }
        let store = FileVoiceSampleStore::new(dir.path()).await.unwrap();

        store.remove(&VoiceId::sanitize("bob").unwrap()).await.unwrap();

        assert_eq!(file_names(dir.path()).await, vec!["bobby.wav".to_string()]);
    }

    #[tokio::test]
    async fn test_save_replaces_other_formats_of_the_id() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Bob.mp3"), b"old").await.unwrap();
        fs::write(dir.path().join("bobby.ogg"), b"other").await.unwrap();
        let store = FileVoiceSampleStore::new(dir.path()).await.unwrap();

        store
            .save(&VoiceId::sanitize("bob").unwrap(), b"new")
            .await
            .unwrap();

        assert_eq!(
            file_names(dir.path()).await,
            vec!["bob.wav".to_string(), "bobby.ogg".to_string()]
        );
    }

    #[tokio::test]
    async fn test_scan_keeps_one_sample_per_id() {
        let dir = tempdir().unwrap();
        for name in ["BOB.flac", "Bob.mp3", "bob.wav", "Eve.ogg", "eve.mp3"] {
            fs::write(dir.path().join(name), b"x").await.unwrap();
        }
        let store = FileVoiceSampleStore::new(dir.path()).await.unwrap();

        let samples = store.scan().await.unwrap();
        assert_eq!(samples.len(), 2);
        // 规范文件名优先
        assert_eq!(samples[0].id.as_str(), "bob");
        assert_eq!(samples[0].path, dir.path().join("bob.wav"));
        // 没有规范文件时保留排序靠前的
        assert_eq!(samples[1].id.as_str(), "eve");
        assert_eq!(samples[1].path, dir.path().join("Eve.ogg"));
    }

    #[tokio::test]
    async fn test_scan_filters_entries() {
        let dir = tempdir().unwrap();
        for name in [
            "alice.wav",
            "Bob.mp3",
            "notes.txt",
            ".carol.wav.tmp",
            "female_1.wav",
            "###.wav",
        ] {
            fs::write(dir.path().join(name), b"x").await.unwrap();
        }
        fs::create_dir(dir.path().join("nested.wav")).await.unwrap();

        let store = FileVoiceSampleStore::new(dir.path()).await.unwrap();
        let ids: Vec<String> = store
            .scan()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();

        assert_eq!(ids, vec!["bob".to_string(), "alice".to_string()]);
    }
}
