//! # 文件偏好存储
//!
//! 以扁平 JSON 对象保存偏好，每次写入后立即落盘。

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use screen_runtime::{MemoryPreferences, PreferenceError, Preferences};

use crate::error::HostError;

/// 文件偏好存储
#[derive(Debug, Clone)]
pub struct JsonPreferences {
    path: PathBuf,
    values: MemoryPreferences,
}

impl JsonPreferences {
    /// 打开偏好文件，文件不存在时从空白开始
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| HostError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| HostError::Json {
                path: path.clone(),
                source,
            })?
        } else {
            MemoryPreferences::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, key: &str) -> Result<(), PreferenceError> {
        let write_error = |message: String| PreferenceError::Write {
            key: key.to_string(),
            message,
        };
        let json =
            serde_json::to_string_pretty(&self.values).map_err(|e| write_error(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| write_error(e.to_string()))?;
        debug!(path = ?self.path, key, "偏好已保存");
        Ok(())
    }
}

impl Preferences for JsonPreferences {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get_bool(key)
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError> {
        self.values.put_bool(key, value)?;
        self.persist(key)
    }

    fn get_u64(&self, key: &str) -> Option<u64> {
        self.values.get_u64(key)
    }

    fn put_u64(&mut self, key: &str, value: u64) -> Result<(), PreferenceError> {
        self.values.put_u64(key, value)?;
        self.persist(key)
    }
}
