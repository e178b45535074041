//! # Screens 模块
//!
//! 宿主可运行的界面。每个界面包装一个 screen-runtime 核心组件，
//! 由 [`crate::driver::HostDriver`] 统一派发事件。

mod about;
mod close_immediately;
mod donate_reminder;

pub use about::AboutScreen;
pub use close_immediately::CloseImmediatelyScreen;
pub use donate_reminder::DonateReminderScreen;

use screen_runtime::{DismissEvent, LifecycleEvent, ScreenId, ScreenResult, ThemeVariant, TimerHandle};
use tracing::debug;

use crate::driver::UserAction;

/// 宿主界面
///
/// 除生命周期外的事件都有默认的忽略实现，界面只需覆盖自己关心的部分。
pub trait Screen {
    fn id(&self) -> ScreenId;

    /// 宿主生命周期事件
    fn on_lifecycle(&mut self, event: LifecycleEvent) -> ScreenResult<()>;

    /// 覆盖层 dismiss 通知
    fn on_overlay_dismissed(&mut self, event: DismissEvent) -> ScreenResult<()> {
        debug!(screen = %self.id(), overlay = event.overlay.0, "界面没有覆盖层，忽略 dismiss");
        Ok(())
    }

    /// 定时器到期
    fn on_timer_fired(&mut self, handle: TimerHandle) -> ScreenResult<()> {
        debug!(screen = %self.id(), handle = handle.0, "界面没有定时器，忽略到期");
        Ok(())
    }

    /// 用户操作
    fn on_user_action(&mut self, action: UserAction) -> ScreenResult<()> {
        debug!(screen = %self.id(), ?action, "界面不处理该操作");
        Ok(())
    }

    /// 当前可见覆盖层的主题
    fn overlay_theme(&self) -> Option<ThemeVariant> {
        None
    }
}
