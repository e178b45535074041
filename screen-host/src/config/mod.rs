//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use screen_runtime::{CLOSE_IMMEDIATELY_DELAY, ReminderPolicy};

use crate::error::HostError;

/// 延迟自关闭允许的最长延迟
const MAX_CLOSE_DELAY_MS: u64 = 10_000;

/// 主题设置
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    /// 跟随系统
    #[default]
    System,
    /// 深色
    Dark,
    /// 浅色
    Light,
}

/// 宿主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// "立即关闭" 界面的延迟（毫秒）
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,

    /// 覆盖层主题
    #[serde(default)]
    pub theme: ThemeSetting,

    /// 默认日志级别（`RUST_LOG` 优先）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 偏好存储文件
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,

    /// 捐赠提醒配置
    #[serde(default)]
    pub reminder: ReminderConfig,
}

/// 捐赠提醒配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// 是否启用
    #[serde(default = "default_reminder_enabled")]
    pub enabled: bool,

    /// 使用次数必须超过此值才提醒
    #[serde(default = "default_min_usage_count")]
    pub min_usage_count: u64,

    /// 捐赠页面地址，未配置时只记录日志
    #[serde(default)]
    pub donate_url: Option<String>,
}

// 默认值函数
fn default_close_delay_ms() -> u64 {
    u64::try_from(CLOSE_IMMEDIATELY_DELAY.as_millis()).unwrap_or(u64::MAX)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("prefs.json")
}

fn default_reminder_enabled() -> bool {
    true
}

fn default_min_usage_count() -> u64 {
    ReminderPolicy::default().min_usage_count
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: default_close_delay_ms(),
            theme: ThemeSetting::default(),
            log_level: default_log_level(),
            preferences_path: default_preferences_path(),
            reminder: ReminderConfig::default(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: default_reminder_enabled(),
            min_usage_count: default_min_usage_count(),
            donate_url: None,
        }
    }
}

impl HostConfig {
    /// 加载配置文件
    ///
    /// 文件不存在时返回默认配置并打印警告；文件存在但无法解析时返回错误。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        match Self::read(path)? {
            Some(config) => {
                info!(?path, "配置文件加载成功");
                Ok(config)
            }
            None => {
                warn!(?path, "配置文件不存在，使用默认配置");
                Ok(Self::default())
            }
        }
    }

    /// 读取配置文件，不输出日志
    ///
    /// 文件不存在时返回 `None`。日志系统尚未初始化时使用，由调用方在初始化后补记。
    pub fn read(path: impl AsRef<Path>) -> Result<Option<Self>, HostError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| HostError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HostError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| HostError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 延迟为 0 时结果上报与终止会落在同一时刻
        if self.close_delay_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "close_delay_ms 必须大于 0".to_string(),
            ));
        }
        if self.close_delay_ms > MAX_CLOSE_DELAY_MS {
            return Err(ConfigError::ValidationFailed(format!(
                "close_delay_ms 不能超过 {MAX_CLOSE_DELAY_MS}，当前为 {}",
                self.close_delay_ms
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "log_level 不能为空".to_string(),
            ));
        }
        Ok(())
    }

    /// "立即关闭" 界面的延迟
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    /// 捐赠提醒策略
    pub fn reminder_policy(&self) -> ReminderPolicy {
        ReminderPolicy {
            min_usage_count: self.reminder.min_usage_count,
        }
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.close_delay(), Duration::from_millis(200));
        assert_eq!(config.theme, ThemeSetting::System);
        assert_eq!(config.log_level, "info");
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder_policy().min_usage_count, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: HostConfig =
            serde_json::from_str(r#"{ "theme": "light", "reminder": { "min_usage_count": 10 } }"#)
                .unwrap();

        assert_eq!(config.theme, ThemeSetting::Light);
        assert_eq!(config.close_delay_ms, 200);
        assert_eq!(config.reminder.min_usage_count, 10);
        assert!(config.reminder.enabled);
    }

    #[test]
    fn test_validate_rejects_long_delay() {
        let config = HostConfig {
            close_delay_ms: 60_000,
            ..HostConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_delay() {
        let config = HostConfig {
            close_delay_ms: 0,
            ..HostConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_read_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(HostConfig::read(&path).unwrap().is_none());

        HostConfig::default().save(&path).unwrap();
        let config = HostConfig::read(&path).unwrap().unwrap();
        assert_eq!(config.close_delay_ms, 200);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = HostConfig::load(dir.path().join("missing.json")).unwrap();
        assert_eq!(config.close_delay_ms, 200);
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            HostConfig::load(&path),
            Err(HostError::Json { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = HostConfig {
            close_delay_ms: 350,
            theme: ThemeSetting::Dark,
            ..HostConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = HostConfig::load(&path).unwrap();
        assert_eq!(loaded.close_delay_ms, 350);
        assert_eq!(loaded.theme, ThemeSetting::Dark);
    }
}
