//! # 主题解析

use screen_runtime::{OverlayError, ThemeResolver, ThemeVariant};

use crate::config::ThemeSetting;

/// 由配置决定的主题解析器
///
/// `System` 没有可查询的系统外观，按默认的深色处理。
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredTheme {
    setting: ThemeSetting,
}

impl ConfiguredTheme {
    pub fn new(setting: ThemeSetting) -> Self {
        Self { setting }
    }
}

impl ThemeResolver for ConfiguredTheme {
    fn resolve_theme_variant(&self) -> Result<ThemeVariant, OverlayError> {
        Ok(match self.setting {
            ThemeSetting::System => ThemeVariant::default(),
            ThemeSetting::Dark => ThemeVariant::Dark,
            ThemeSetting::Light => ThemeVariant::Light,
        })
    }
}
