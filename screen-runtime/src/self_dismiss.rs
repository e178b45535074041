//! # Self Dismiss 模块
//!
//! 延迟自关闭界面：激活后立即上报成功结果，并在固定延迟后静默终止自身，
//! 与任何用户操作无关。
//!
//! ## 执行模型
//!
//! ```text
//! on_activate ──► set_result(Ok) ──► schedule(delay)
//!                                         │
//!          on_timer_fired(handle) ◄───────┘  ──► terminate(SuppressTransition)
//!
//! on_destroyed ──► cancel(handle)            (到期前被宿主销毁)
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ScreenError, TerminationError};
use crate::lifecycle::{HostScreen, LifecycleEvent, ScreenId};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::termination::{LaunchResultSink, LaunchStatus, TerminationMode, Terminator};

/// "立即关闭" 界面的默认延迟
pub const CLOSE_IMMEDIATELY_DELAY: Duration = Duration::from_millis(200);

/// 待执行的延迟终止
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTermination {
    pub screen: ScreenId,
    pub delay: Duration,
    pub handle: TimerHandle,
}

/// `on_activate` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfDismissOutcome {
    /// 已上报结果并安排终止
    Scheduled(ScheduledTermination),
    /// 已有待执行的终止，沿用第一次激活的期限
    AlreadyScheduled(ScheduledTermination),
    /// 界面已终止
    Terminated,
}

/// 延迟自关闭界面
///
/// 待执行的终止与界面同生共死：界面被销毁或被 drop 时都会取消定时器，
/// 不会有针对已销毁界面的回调残留。
pub struct DelayedSelfDismissScreen<S, T, L>
where
    S: Scheduler,
    T: Terminator,
    L: LaunchResultSink,
{
    screen: HostScreen,
    delay: Duration,
    scheduler: S,
    terminator: T,
    results: L,
    pending: Option<ScheduledTermination>,
}

impl<S, T, L> DelayedSelfDismissScreen<S, T, L>
where
    S: Scheduler,
    T: Terminator,
    L: LaunchResultSink,
{
    /// 创建界面
    ///
    /// `delay` 是该界面类型的固定延迟，宿主派发 `Resumed` 时使用。
    pub fn new(screen: ScreenId, delay: Duration, scheduler: S, terminator: T, results: L) -> Self {
        Self {
            screen: HostScreen::new(screen),
            delay,
            scheduler,
            terminator,
            results,
            pending: None,
        }
    }

    pub fn screen(&self) -> &HostScreen {
        &self.screen
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 待执行的终止
    pub fn pending(&self) -> Option<&ScheduledTermination> {
        self.pending.as_ref()
    }

    /// 处理宿主生命周期事件
    pub fn on_lifecycle(
        &mut self,
        event: LifecycleEvent,
    ) -> Result<Option<SelfDismissOutcome>, ScreenError> {
        match event {
            LifecycleEvent::Destroyed => {
                self.on_destroyed();
                Ok(None)
            }
            LifecycleEvent::Resumed => {
                self.screen.handle(event)?;
                Ok(Some(self.on_activate(self.delay)))
            }
            LifecycleEvent::Paused => {
                self.screen.handle(event)?;
                Ok(None)
            }
        }
    }

    /// 激活界面
    ///
    /// 先上报成功结果，再安排在 `delay` 之后终止。界面在激活后 `delay` 内必然终止，
    /// 重复激活不会延长或缩短这个期限。
    pub fn on_activate(&mut self, delay: Duration) -> SelfDismissOutcome {
        let screen = self.screen.id();

        if self.screen.is_terminated() {
            return SelfDismissOutcome::Terminated;
        }
        if let Some(pending) = self.pending {
            debug!(%screen, "终止已安排，忽略重复激活");
            return SelfDismissOutcome::AlreadyScheduled(pending);
        }

        self.results.set_result(screen, LaunchStatus::Ok);
        let handle = self.scheduler.schedule(delay, screen);
        let pending = ScheduledTermination {
            screen,
            delay,
            handle,
        };
        self.pending = Some(pending);

        info!(%screen, ?delay, "已安排延迟终止");
        SelfDismissOutcome::Scheduled(pending)
    }

    /// 定时器到期
    ///
    /// 只有与待执行终止匹配的句柄才会生效，返回本次是否终止了界面。
    pub fn on_timer_fired(&mut self, handle: TimerHandle) -> Result<bool, TerminationError> {
        let screen = self.screen.id();

        match self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
            }
            _ => {
                debug!(%screen, handle = handle.0, "忽略未知或已取消的定时器");
                return Ok(false);
            }
        }

        if !self.screen.mark_terminated() {
            return Ok(false);
        }
        info!(%screen, "延迟到期，静默终止界面");
        self.terminator
            .terminate(screen, TerminationMode::SuppressTransition)?;
        Ok(true)
    }

    /// 宿主在延迟到期前销毁了界面
    pub fn on_destroyed(&mut self) {
        self.cancel_pending();
        self.screen.mark_terminated();
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take()
            && self.scheduler.cancel(pending.handle)
        {
            debug!(screen = %pending.screen, handle = pending.handle.0, "取消延迟终止");
        }
    }
}

impl<S, T, L> Drop for DelayedSelfDismissScreen<S, T, L>
where
    S: Scheduler,
    T: Terminator,
    L: LaunchResultSink,
{
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
