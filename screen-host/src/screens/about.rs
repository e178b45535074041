//! # 关于界面
//!
//! 宿主界面只负责承载一个"关于"覆盖层，覆盖层关闭即结束。

use screen_runtime::{
    DismissEvent, LifecycleEvent, ModalOverlayCoordinator, Overlay, ScreenId, ScreenResult,
    ThemeVariant,
};
use tracing::debug;

use super::Screen;
use crate::bridge::{ChannelTerminator, dismiss_route};
use crate::config::HostConfig;
use crate::driver::{EventSender, UserAction};
use crate::overlay::ConsoleOverlayFactory;
use crate::theme::ConfiguredTheme;

type AboutCoordinator = ModalOverlayCoordinator<ConfiguredTheme, ConsoleOverlayFactory, ChannelTerminator>;

/// 关于界面
pub struct AboutScreen {
    coordinator: AboutCoordinator,
}

impl AboutScreen {
    pub fn new(id: ScreenId, config: &HostConfig, tx: EventSender) -> Self {
        let factory = ConsoleOverlayFactory::new(
            "About",
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        );
        Self {
            coordinator: ModalOverlayCoordinator::new(
                id,
                ConfiguredTheme::new(config.theme),
                factory,
                ChannelTerminator::new(tx.clone()),
                dismiss_route(tx),
            ),
        }
    }

    pub fn coordinator(&self) -> &AboutCoordinator {
        &self.coordinator
    }
}

impl Screen for AboutScreen {
    fn id(&self) -> ScreenId {
        self.coordinator.screen().id()
    }

    fn on_lifecycle(&mut self, event: LifecycleEvent) -> ScreenResult<()> {
        self.coordinator.on_lifecycle(event)?;
        Ok(())
    }

    fn on_overlay_dismissed(&mut self, event: DismissEvent) -> ScreenResult<()> {
        self.coordinator.on_overlay_dismissed(event)?;
        Ok(())
    }

    fn on_user_action(&mut self, action: UserAction) -> ScreenResult<()> {
        match action {
            UserAction::DismissOverlay => match self.coordinator.overlay_mut() {
                Some(overlay) => {
                    overlay.dismiss();
                }
                None => debug!(screen = %self.id(), "没有可关闭的覆盖层"),
            },
            UserAction::Respond(_) => {}
        }
        Ok(())
    }

    fn overlay_theme(&self) -> Option<ThemeVariant> {
        self.coordinator
            .overlay()
            .filter(|overlay| overlay.is_visible())
            .map(|overlay| overlay.theme())
    }
}
