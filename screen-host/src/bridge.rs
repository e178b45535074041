//! # Bridge 模块
//!
//! 把 screen-runtime 的外部接口接到事件通道上。

use std::rc::Rc;
use tracing::warn;

use screen_runtime::{
    DismissEvent, DismissRoute, LaunchResultSink, LaunchStatus, ScreenId, TerminationError,
    TerminationMode, Terminator,
};

use crate::driver::{EventSender, HostEvent};

/// 终止请求以 [`HostEvent::Finished`] 投递给事件循环
#[derive(Debug, Clone)]
pub struct ChannelTerminator {
    tx: EventSender,
}

impl ChannelTerminator {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }
}

impl Terminator for ChannelTerminator {
    fn terminate(
        &mut self,
        screen: ScreenId,
        mode: TerminationMode,
    ) -> Result<(), TerminationError> {
        self.tx
            .send(HostEvent::Finished { screen, mode })
            .map_err(|_| TerminationError {
                screen,
                message: "事件循环已退出".to_string(),
            })
    }
}

/// 启动结果以 [`HostEvent::LaunchResult`] 投递给事件循环
#[derive(Debug, Clone)]
pub struct ChannelResults {
    tx: EventSender,
}

impl ChannelResults {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }
}

impl LaunchResultSink for ChannelResults {
    fn set_result(&mut self, screen: ScreenId, status: LaunchStatus) {
        if self
            .tx
            .send(HostEvent::LaunchResult { screen, status })
            .is_err()
        {
            warn!(%screen, ?status, "事件循环已退出，启动结果被丢弃");
        }
    }
}

/// dismiss 通知以 [`HostEvent::OverlayDismissed`] 投递给事件循环
pub fn dismiss_route(tx: EventSender) -> DismissRoute {
    Rc::new(move |event: DismissEvent| {
        if tx.send(HostEvent::OverlayDismissed(event)).is_err() {
            warn!(screen = %event.screen, "事件循环已退出，dismiss 通知被丢弃");
        }
    })
}
