//! # Error 模块
//!
//! 定义 screen-runtime 中使用的错误类型。

use thiserror::Error;

use crate::lifecycle::{LifecycleEvent, ScreenId, ScreenPhase};

/// 覆盖层构造错误
///
/// 出现此错误时协调器不会跟踪任何半构造的覆盖层，界面保持在 `NoOverlay`，
/// 宿主可以在下一次激活时重试。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// 主题解析失败
    #[error("主题解析失败: {message}")]
    ThemeResolution { message: String },

    /// 覆盖层构造失败
    #[error("覆盖层构造失败: {message}")]
    Construction { message: String },

    /// 覆盖层显示失败
    #[error("覆盖层显示失败: {message}")]
    Show { message: String },
}

/// 终止错误
///
/// 宿主框架的终止调用失败。核心不做本地恢复，由宿主视为致命错误处理。
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{screen} 终止失败: {message}")]
pub struct TerminationError {
    pub screen: ScreenId,
    pub message: String,
}

/// 生命周期错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifecycleError {
    /// 当前阶段不允许此事件
    #[error("{screen} 处于 {phase:?}，不能处理事件 {event:?}")]
    InvalidTransition {
        screen: ScreenId,
        phase: ScreenPhase,
        event: LifecycleEvent,
    },
}

/// 偏好存储错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreferenceError {
    /// 写入失败
    #[error("偏好 '{key}' 写入失败: {message}")]
    Write { key: String, message: String },
}

/// screen-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenError {
    /// 覆盖层错误
    #[error("覆盖层错误: {0}")]
    Overlay(#[from] OverlayError),

    /// 终止错误
    #[error("终止错误: {0}")]
    Termination(#[from] TerminationError),

    /// 生命周期错误
    #[error("生命周期错误: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// 偏好存储错误
    #[error("偏好存储错误: {0}")]
    Preference(#[from] PreferenceError),
}

/// Result 类型别名
pub type ScreenResult<T> = Result<T, ScreenError>;
