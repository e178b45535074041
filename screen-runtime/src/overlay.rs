//! # Overlay 模块
//!
//! 覆盖层抽象与一次性 dismiss 通知。
//!
//! ## 设计说明
//!
//! - 每个覆盖层只注册一个 [`DismissSink`]，不是开放的观察者列表
//! - `DismissSink` 至多触发一次，之后的触发被忽略
//! - 通知经由 [`DismissRoute`] 送回宿主，再由宿主派发给协调器，
//!   覆盖层本身不持有协调器的引用

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::error::OverlayError;
use crate::lifecycle::ScreenId;
use crate::theme::ThemeVariant;

/// 覆盖层标识符
///
/// 同一界面内单调递增，覆盖层关闭后不会复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

/// 覆盖层关闭事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissEvent {
    pub screen: ScreenId,
    pub overlay: OverlayId,
}

/// Dismiss 通知的投递路径
///
/// 单线程模型，回调与激活在同一逻辑线程上执行。
pub type DismissRoute = Rc<dyn Fn(DismissEvent)>;

/// 一次性 dismiss 通知
pub struct DismissSink {
    event: DismissEvent,
    route: Option<DismissRoute>,
}

impl DismissSink {
    pub fn new(event: DismissEvent, route: DismissRoute) -> Self {
        Self {
            event,
            route: Some(route),
        }
    }

    /// 本通知对应的事件
    pub fn event(&self) -> DismissEvent {
        self.event
    }

    /// 是否已经触发过
    pub fn is_fired(&self) -> bool {
        self.route.is_none()
    }

    /// 触发通知
    ///
    /// 只有第一次调用会投递事件并返回 `true`。
    pub fn fire(&mut self) -> bool {
        match self.route.take() {
            Some(route) => {
                route(self.event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for DismissSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissSink")
            .field("event", &self.event)
            .field("fired", &self.is_fired())
            .finish()
    }
}

/// 覆盖层显示接口
///
/// 由宿主框架实现（对话框、弹窗等）。
pub trait Overlay {
    /// 显示覆盖层
    fn show(&mut self) -> Result<(), OverlayError>;

    /// 覆盖层当前是否可见
    fn is_visible(&self) -> bool;

    /// 注册 dismiss 通知
    fn set_dismiss_sink(&mut self, sink: DismissSink);

    /// 构造时确定的主题
    fn theme(&self) -> ThemeVariant;
}

/// 覆盖层工厂
pub trait OverlayFactory {
    type Overlay: Overlay;

    /// 以指定主题构造新的覆盖层（尚未显示）
    fn create(&mut self, id: OverlayId, theme: ThemeVariant)
    -> Result<Self::Overlay, OverlayError>;
}
