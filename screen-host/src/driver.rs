//! # Driver 模块
//!
//! 单线程事件循环：把生命周期事件、dismiss 通知、定时器到期和用户操作
//! 按到达顺序派发给界面，直到界面终止或被宿主销毁。
//!
//! ```text
//! TokioScheduler ──TimerFired──┐
//! DismissRoute ──Dismissed─────┤
//! CLI / 测试 ──User/Lifecycle──┼──► mpsc ──► HostDriver::run ──► Screen
//! ChannelTerminator ──Finished─┘
//! ```

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use screen_runtime::{
    DismissEvent, LaunchStatus, LifecycleEvent, ReminderResponse, ScreenError, ScreenId,
    TerminationMode, ThemeVariant, TimerHandle,
};

use crate::error::{HostError, HostResult};
use crate::screens::Screen;

/// 用户操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// 关闭覆盖层（返回键、点击外部等）
    DismissOverlay,
    /// 回应捐赠提醒
    Respond(ReminderResponse),
}

/// 宿主事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// 宿主生命周期
    Lifecycle(LifecycleEvent),
    /// 覆盖层的一次性 dismiss 通知
    OverlayDismissed(DismissEvent),
    /// 定时器到期
    TimerFired { screen: ScreenId, handle: TimerHandle },
    /// 用户操作
    User(UserAction),
    /// 界面上报的启动结果
    LaunchResult { screen: ScreenId, status: LaunchStatus },
    /// 界面请求终止
    Finished { screen: ScreenId, mode: TerminationMode },
}

pub type EventSender = mpsc::UnboundedSender<HostEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<HostEvent>;

/// 创建事件通道
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// 一次运行的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// 启动结果及其上报时刻（相对运行开始）
    pub launch_result: Option<(LaunchStatus, Duration)>,
    /// 终止方式及终止时刻
    pub finished: Option<(TerminationMode, Duration)>,
    /// 是否由宿主销毁
    pub destroyed_by_host: bool,
    /// 显示过的覆盖层主题
    pub overlay_theme: Option<ThemeVariant>,
    /// 覆盖层构造失败的次数
    pub overlay_failures: usize,
}

/// 事件循环
///
/// 驱动器不持有发送端：界面和外部注入方的发送端全部释放后，
/// 若界面仍未终止，`run` 返回 [`HostError::ChannelClosed`]。
pub struct HostDriver {
    screen: Box<dyn Screen>,
    rx: EventReceiver,
}

impl HostDriver {
    pub fn new(screen: Box<dyn Screen>, rx: EventReceiver) -> Self {
        Self { screen, rx }
    }

    /// 激活界面并运行到界面终止
    pub async fn run(mut self) -> HostResult<RunReport> {
        let started = Instant::now();
        let id = self.screen.id();
        let mut report = RunReport::default();

        info!(screen = %id, "启动界面");
        self.dispatch(HostEvent::Lifecycle(LifecycleEvent::Resumed), &mut report)?;

        loop {
            let Some(event) = self.rx.recv().await else {
                return Err(HostError::ChannelClosed(id));
            };
            debug!(screen = %id, ?event, "派发事件");

            match event {
                HostEvent::LaunchResult { screen, status } if screen == id => {
                    report.launch_result = Some((status, started.elapsed()));
                }
                HostEvent::Finished { screen, mode } if screen == id => {
                    report.finished = Some((mode, started.elapsed()));
                    info!(screen = %id, ?mode, "界面已终止");
                    break;
                }
                HostEvent::LaunchResult { screen, .. }
                | HostEvent::Finished { screen, .. }
                | HostEvent::TimerFired { screen, .. } if screen != id => {
                    warn!(screen = %id, from = %screen, "丢弃其他界面的事件");
                }
                HostEvent::Lifecycle(LifecycleEvent::Destroyed) => {
                    self.dispatch(event, &mut report)?;
                    report.destroyed_by_host = true;
                    break;
                }
                event => self.dispatch(event, &mut report)?,
            }
        }

        Ok(report)
    }

    fn dispatch(&mut self, event: HostEvent, report: &mut RunReport) -> HostResult<()> {
        let result = match event {
            HostEvent::Lifecycle(event) => self.screen.on_lifecycle(event),
            HostEvent::OverlayDismissed(event) => self.screen.on_overlay_dismissed(event),
            HostEvent::TimerFired { handle, .. } => self.screen.on_timer_fired(handle),
            HostEvent::User(action) => self.screen.on_user_action(action),
            HostEvent::LaunchResult { .. } | HostEvent::Finished { .. } => Ok(()),
        };

        if let Some(theme) = self.screen.overlay_theme() {
            report.overlay_theme = Some(theme);
        }

        match result {
            Ok(()) => Ok(()),
            // 覆盖层没能显示：界面停留在空白状态，等待宿主下一次激活
            Err(ScreenError::Overlay(err)) => {
                error!(screen = %self.screen.id(), %err, "覆盖层显示失败");
                report.overlay_failures += 1;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
