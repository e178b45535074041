//! # Theme 模块
//!
//! 覆盖层的主题变体。主题在覆盖层构造时解析一次，之后不再变化。

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// 主题变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// 深色主题（默认）
    #[default]
    Dark,
    /// 浅色主题
    Light,
}

/// 主题解析
///
/// 纯查询，无副作用；同一进程内多次调用应返回相同结果。
pub trait ThemeResolver {
    fn resolve_theme_variant(&self) -> Result<ThemeVariant, OverlayError>;
}

/// 固定主题
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTheme(pub ThemeVariant);

impl ThemeResolver for FixedTheme {
    fn resolve_theme_variant(&self) -> Result<ThemeVariant, OverlayError> {
        Ok(self.0)
    }
}

impl<R: ThemeResolver + ?Sized> ThemeResolver for &R {
    fn resolve_theme_variant(&self) -> Result<ThemeVariant, OverlayError> {
        (**self).resolve_theme_variant()
    }
}
