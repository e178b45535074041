//! # Preferences 模块
//!
//! 简单的键值偏好存储，值只有布尔与计数两种。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PreferenceError;

/// 使用次数计数键
pub const USAGE_COUNT_KEY: &str = "UsageCount";

/// 偏好值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Count(u64),
}

/// 偏好存储
pub trait Preferences {
    fn get_bool(&self, key: &str) -> Option<bool>;

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError>;

    fn get_u64(&self, key: &str) -> Option<u64>;

    fn put_u64(&mut self, key: &str, value: u64) -> Result<(), PreferenceError>;

    /// 使用次数加一，返回新的计数
    fn increment_usage_count(&mut self) -> Result<u64, PreferenceError> {
        let count = self.get_u64(USAGE_COUNT_KEY).unwrap_or(0).saturating_add(1);
        self.put_u64(USAGE_COUNT_KEY, count)?;
        Ok(count)
    }
}

/// 内存偏好存储
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryPreferences {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Preferences for MemoryPreferences {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(PrefValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), PrefValue::Bool(value));
        Ok(())
    }

    fn get_u64(&self, key: &str) -> Option<u64> {
        match self.values.get(key) {
            Some(PrefValue::Count(value)) => Some(*value),
            _ => None,
        }
    }

    fn put_u64(&mut self, key: &str, value: u64) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), PrefValue::Count(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() {
        let mut prefs = MemoryPreferences::new();
        prefs.put_bool("flag", true).unwrap();
        prefs.put_u64("count", 3).unwrap();

        assert_eq!(prefs.get_bool("flag"), Some(true));
        assert_eq!(prefs.get_u64("count"), Some(3));
        // 类型不匹配视为不存在
        assert_eq!(prefs.get_bool("count"), None);
        assert_eq!(prefs.get_u64("missing"), None);
    }

    #[test]
    fn test_increment_usage_count() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.increment_usage_count().unwrap(), 1);
        assert_eq!(prefs.increment_usage_count().unwrap(), 2);
        assert_eq!(prefs.get_u64(USAGE_COUNT_KEY), Some(2));
    }

    #[test]
    fn test_serialization_is_flat_object() {
        let mut prefs = MemoryPreferences::new();
        prefs.put_bool("DismissedDonateReminder", true).unwrap();
        prefs.put_u64(USAGE_COUNT_KEY, 6).unwrap();

        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"DismissedDonateReminder":true,"UsageCount":6}"#);

        let loaded: MemoryPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, prefs);
    }
}
