//! # 捐赠提醒界面
//!
//! 用覆盖层展示提醒内容；用户回应后写入偏好并关闭覆盖层，界面随之终止。

use screen_runtime::{
    DismissEvent, LifecycleEvent, ModalOverlayCoordinator, Overlay, Preferences, ReminderAction,
    ReminderLayout, ReminderResponse, ScreenId, ScreenResult, ThemeVariant,
};
use tracing::{debug, info};

use super::Screen;
use crate::bridge::{ChannelTerminator, dismiss_route};
use crate::config::HostConfig;
use crate::driver::{EventSender, UserAction};
use crate::overlay::ConsoleOverlayFactory;
use crate::theme::ConfiguredTheme;

type ReminderCoordinator =
    ModalOverlayCoordinator<ConfiguredTheme, ConsoleOverlayFactory, ChannelTerminator>;

fn overlay_text(layout: ReminderLayout) -> (&'static str, &'static str) {
    match layout {
        ReminderLayout::Donate => ("Donate", "如果这个应用对你有帮助，请考虑捐赠支持开发。"),
        ReminderLayout::Birthday => ("Happy birthday", "今天是项目生日，欢迎捐赠庆祝。"),
        ReminderLayout::BirthdayMissed => ("Birthday missed", "项目生日刚过去，现在捐赠也不晚。"),
    }
}

/// 捐赠提醒界面
pub struct DonateReminderScreen<P: Preferences + 'static> {
    coordinator: ReminderCoordinator,
    prefs: P,
    layout: ReminderLayout,
    donate_url: Option<String>,
    last_action: Option<ReminderAction>,
}

impl<P: Preferences + 'static> DonateReminderScreen<P> {
    pub fn new(
        id: ScreenId,
        config: &HostConfig,
        layout: ReminderLayout,
        prefs: P,
        tx: EventSender,
    ) -> Self {
        let (title, body) = overlay_text(layout);
        Self {
            coordinator: ModalOverlayCoordinator::new(
                id,
                ConfiguredTheme::new(config.theme),
                ConsoleOverlayFactory::new(title, body),
                ChannelTerminator::new(tx.clone()),
                dismiss_route(tx),
            ),
            prefs,
            layout,
            donate_url: config.reminder.donate_url.clone(),
            last_action: None,
        }
    }

    pub fn layout(&self) -> ReminderLayout {
        self.layout
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// 最近一次回应产生的动作
    pub fn last_action(&self) -> Option<ReminderAction> {
        self.last_action
    }

    fn respond(&mut self, response: ReminderResponse) -> ScreenResult<()> {
        let action = response.apply(&mut self.prefs)?;
        match action {
            ReminderAction::OpenDonatePage => match &self.donate_url {
                Some(url) => info!(screen = %self.id(), %url, "打开捐赠页面"),
                None => info!(screen = %self.id(), "未配置捐赠页面地址"),
            },
            ReminderAction::RememberedDismissal => {
                debug!(screen = %self.id(), "已记录用户拒绝捐赠提醒");
            }
        }
        self.last_action = Some(action);

        if let Some(overlay) = self.coordinator.overlay_mut() {
            overlay.dismiss();
        }
        Ok(())
    }
}

impl<P: Preferences + 'static> Screen for DonateReminderScreen<P> {
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
            UserAction::Respond(response) => self.respond(response),
            UserAction::DismissOverlay => {
                if let Some(overlay) = self.coordinator.overlay_mut() {
                    overlay.dismiss();
                }
                Ok(())
            }
        }
    }

    fn overlay_theme(&self) -> Option<ThemeVariant> {
        self.coordinator
            .overlay()
            .filter(|overlay| overlay.is_visible())
            .map(|overlay| overlay.theme())
    }
}
