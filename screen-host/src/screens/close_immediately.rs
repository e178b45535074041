//! # "立即关闭" 界面
//!
//! 被外部调用方启动后立即返回成功结果，短暂延迟后静默关闭自己。

use screen_runtime::{DelayedSelfDismissScreen, LifecycleEvent, ScreenId, ScreenResult, TimerHandle};

use super::Screen;
use crate::bridge::{ChannelResults, ChannelTerminator};
use crate::config::HostConfig;
use crate::driver::EventSender;
use crate::scheduler::TokioScheduler;

type CloseCore = DelayedSelfDismissScreen<TokioScheduler, ChannelTerminator, ChannelResults>;

/// "立即关闭" 界面
///
/// 必须在 tokio 运行时内创建和使用。
pub struct CloseImmediatelyScreen {
    core: CloseCore,
}

impl CloseImmediatelyScreen {
    pub fn new(id: ScreenId, config: &HostConfig, tx: EventSender) -> Self {
        Self {
            core: DelayedSelfDismissScreen::new(
                id,
                config.close_delay(),
                TokioScheduler::new(tx.clone()),
                ChannelTerminator::new(tx.clone()),
                ChannelResults::new(tx),
            ),
        }
    }

    pub fn core(&self) -> &CloseCore {
        &self.core
    }
}

impl Screen for CloseImmediatelyScreen {
    fn id(&self) -> ScreenId {
        self.core.screen().id()
    }

    fn on_lifecycle(&mut self, event: LifecycleEvent) -> ScreenResult<()> {
        self.core.on_lifecycle(event)?;
        Ok(())
    }

    fn on_timer_fired(&mut self, handle: TimerHandle) -> ScreenResult<()> {
        self.core.on_timer_fired(handle)?;
        Ok(())
    }
}
