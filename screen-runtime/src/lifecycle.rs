//! # Lifecycle 模块
//!
//! 定义宿主界面的生命周期状态机。
//!
//! ## 设计原则
//!
//! - 生命周期阶段**显式建模**，转换由纯函数 [`ScreenPhase::apply`] 完成
//! - `Terminated` 是吸收态：终止只发生一次，重复终止是无操作
//! - 宿主框架是外部驱动者，核心不假设任何窗口系统

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LifecycleError;

/// 界面标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(pub u64);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// 生命周期阶段
///
/// # 状态转换
///
/// ```text
/// Created   --Resumed-->   Resumed
/// Resumed   --Paused-->    Paused
/// Paused    --Resumed-->   Resumed
/// Resumed   --Resumed-->   Resumed     (宿主重复激活，自环)
/// *         --Destroyed--> Terminated
/// Terminated --*-->        Terminated  (吸收态)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenPhase {
    /// 已创建，尚未激活
    Created,
    /// 前台激活
    Resumed,
    /// 暂时离开前台
    Paused,
    /// 已终止
    Terminated,
}

/// 宿主派发的生命周期事件
///
/// `Created` 不是事件：界面构造即处于 [`ScreenPhase::Created`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// 界面进入前台
    Resumed,
    /// 界面离开前台
    Paused,
    /// 宿主销毁界面
    Destroyed,
}

impl ScreenPhase {
    /// 是否已终止
    pub fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// 纯转换函数
    ///
    /// 返回 `None` 表示该事件在当前阶段不合法。
    pub fn apply(self, event: LifecycleEvent) -> Option<ScreenPhase> {
        match (self, event) {
            (Self::Terminated, _) => Some(Self::Terminated),
            (_, LifecycleEvent::Destroyed) => Some(Self::Terminated),
            (_, LifecycleEvent::Resumed) => Some(Self::Resumed),
            (Self::Resumed | Self::Paused, LifecycleEvent::Paused) => Some(Self::Paused),
            (Self::Created, LifecycleEvent::Paused) => None,
        }
    }
}

/// 宿主界面
///
/// 由宿主框架创建一次，至多终止一次。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostScreen {
    id: ScreenId,
    phase: ScreenPhase,
}

impl HostScreen {
    /// 创建处于 `Created` 阶段的界面
    pub fn new(id: ScreenId) -> Self {
        Self {
            id,
            phase: ScreenPhase::Created,
        }
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase.is_terminated()
    }

    /// 处理生命周期事件，返回新的阶段
    pub fn handle(&mut self, event: LifecycleEvent) -> Result<ScreenPhase, LifecycleError> {
        let next = self
            .phase
            .apply(event)
            .ok_or(LifecycleError::InvalidTransition {
                screen: self.id,
                phase: self.phase,
                event,
            })?;
        self.phase = next;
        Ok(next)
    }

    /// 标记终止
    ///
    /// 仅第一次调用返回 `true`，之后均为无操作。
    pub fn mark_terminated(&mut self) -> bool {
        if self.phase.is_terminated() {
            return false;
        }
        self.phase = ScreenPhase::Terminated;
        true
    }
}
