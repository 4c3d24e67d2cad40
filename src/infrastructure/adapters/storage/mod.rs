//! Storage Adapter - 参考音频文件存储

mod file_storage;

pub use file_storage::FileVoiceSampleStore;
