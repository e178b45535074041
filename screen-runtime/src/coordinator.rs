//! # Coordinator 模块
//!
//! 生命周期绑定的模态覆盖层协调器。
//!
//! ## 状态机
//!
//! ```text
//! NoOverlay --on_activate--> OverlayVisible --dismiss--> Dismissing --on_overlay_dismissed--> Terminated
//!                  OverlayVisible --on_activate--> OverlayVisible   (自环，无操作)
//!                      Dismissing --on_activate--> Dismissing       (不再显示)
//! ```
//!
//! dismiss 通知经由宿主异步送回，在它到达之前覆盖层已不可见。
//! sink 一旦触发，该覆盖层即视为已关闭，期间的激活不会构造新的覆盖层。
//! `Terminated` 之后没有任何回到其他状态的路径。

use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::error::{OverlayError, ScreenError, TerminationError};
use crate::lifecycle::{HostScreen, LifecycleEvent, ScreenId};
use crate::overlay::{DismissEvent, DismissRoute, DismissSink, Overlay, OverlayFactory, OverlayId};
use crate::termination::{TerminationMode, Terminator};
use crate::theme::{ThemeResolver, ThemeVariant};

/// 协调器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// 没有可见的覆盖层
    NoOverlay,
    /// 覆盖层可见
    OverlayVisible(OverlayId),
    /// 覆盖层已关闭，等待 dismiss 通知送达
    Dismissing(OverlayId),
    /// 宿主界面已终止
    Terminated,
}

/// `on_activate` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// 构造并显示了新的覆盖层
    Shown {
        overlay: OverlayId,
        theme: ThemeVariant,
    },
    /// 已有可见覆盖层，什么都没做
    AlreadyVisible(OverlayId),
    /// 覆盖层已关闭，界面即将终止，不再显示
    DismissPending(OverlayId),
    /// 界面已终止，忽略激活
    Terminated,
}

/// `on_overlay_dismissed` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// 本次调用终止了宿主界面
    Terminated,
    /// 重复或过期的通知，忽略
    Ignored,
}

struct TrackedOverlay<O> {
    id: OverlayId,
    overlay: O,
}

/// 模态覆盖层协调器
///
/// 保证每个宿主界面至多一个存活的覆盖层，主题正确；覆盖层关闭时终止宿主界面。
///
/// # 使用示例
///
/// ```ignore
/// let mut coordinator =
///     ModalOverlayCoordinator::new(ScreenId(1), resolver, factory, terminator, route);
///
/// coordinator.on_lifecycle(LifecycleEvent::Resumed)?;   // 显示覆盖层
/// coordinator.on_lifecycle(LifecycleEvent::Resumed)?;   // 幂等，无操作
///
/// // 覆盖层的 DismissSink 经由 route 送回事件
/// coordinator.on_overlay_dismissed(event)?;             // 终止界面
/// ```
pub struct ModalOverlayCoordinator<R, F, T>
where
    R: ThemeResolver,
    F: OverlayFactory,
    T: Terminator,
{
    screen: HostScreen,
    resolver: R,
    factory: F,
    terminator: T,
    route: DismissRoute,
    overlay: Option<TrackedOverlay<F::Overlay>>,
    next_overlay: u64,
    /// sink 已触发但通知尚未处理的覆盖层
    dismissed: Rc<Cell<Option<OverlayId>>>,
}

impl<R, F, T> ModalOverlayCoordinator<R, F, T>
where
    R: ThemeResolver,
    F: OverlayFactory,
    T: Terminator,
{
    pub fn new(screen: ScreenId, resolver: R, factory: F, terminator: T, route: DismissRoute) -> Self {
        Self {
            screen: HostScreen::new(screen),
            resolver,
            factory,
            terminator,
            route,
            overlay: None,
            next_overlay: 0,
            dismissed: Rc::new(Cell::new(None)),
        }
    }

    pub fn screen(&self) -> &HostScreen {
        &self.screen
    }

    /// 当前状态
    pub fn state(&self) -> CoordinatorState {
        if self.screen.is_terminated() {
            return CoordinatorState::Terminated;
        }
        if let Some(id) = self.dismissed.get() {
            return CoordinatorState::Dismissing(id);
        }
        match &self.overlay {
            Some(tracked) if tracked.overlay.is_visible() => {
                CoordinatorState::OverlayVisible(tracked.id)
            }
            _ => CoordinatorState::NoOverlay,
        }
    }

    /// 当前跟踪的覆盖层
    pub fn overlay(&self) -> Option<&F::Overlay> {
        self.overlay.as_ref().map(|tracked| &tracked.overlay)
    }

    pub fn overlay_mut(&mut self) -> Option<&mut F::Overlay> {
        self.overlay.as_mut().map(|tracked| &mut tracked.overlay)
    }

    /// 处理宿主生命周期事件
    ///
    /// - `Resumed`：调用 [`Self::on_activate`]
    /// - `Destroyed`：丢弃覆盖层，界面视为已终止（宿主已经销毁，不再调用终止接口）
    pub fn on_lifecycle(&mut self, event: LifecycleEvent) -> Result<Option<ActivateOutcome>, ScreenError> {
        let was_terminated = self.screen.is_terminated();
        self.screen.handle(event)?;

        match event {
            LifecycleEvent::Resumed => Ok(Some(self.on_activate()?)),
            LifecycleEvent::Paused => Ok(None),
            LifecycleEvent::Destroyed => {
                if !was_terminated {
                    debug!(screen = %self.screen.id(), "宿主销毁界面，释放覆盖层");
                }
                self.overlay = None;
                Ok(None)
            }
        }
    }

    /// 宿主界面激活
    ///
    /// 若没有跟踪的覆盖层，或跟踪的覆盖层不可见，则解析主题、构造新覆盖层、
    /// 注册 dismiss 通知并显示。已有可见覆盖层时为无操作；
    /// 覆盖层已被关闭而通知尚未送达时同样不做任何事。
    ///
    /// 构造失败时不保留任何半构造的覆盖层，错误同步返回给调用方。
    pub fn on_activate(&mut self) -> Result<ActivateOutcome, OverlayError> {
        let screen = self.screen.id();

        if self.screen.is_terminated() {
            debug!(%screen, "界面已终止，忽略激活");
            return Ok(ActivateOutcome::Terminated);
        }

        if let Some(overlay) = self.dismissed.get() {
            debug!(%screen, overlay = overlay.0, "覆盖层已关闭，等待 dismiss 通知");
            return Ok(ActivateOutcome::DismissPending(overlay));
        }

        if let Some(tracked) = &self.overlay
            && tracked.overlay.is_visible()
        {
            debug!(%screen, overlay = tracked.id.0, "覆盖层已可见，忽略重复激活");
            return Ok(ActivateOutcome::AlreadyVisible(tracked.id));
        }

        // 不可见的旧覆盖层不再复用
        self.overlay = None;

        let theme = self.resolver.resolve_theme_variant()?;
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;

        let mut overlay = self.factory.create(id, theme)?;
        let route = self.route.clone();
        let dismissed = self.dismissed.clone();
        overlay.set_dismiss_sink(DismissSink::new(
            DismissEvent {
                screen,
                overlay: id,
            },
            Rc::new(move |event: DismissEvent| {
                dismissed.set(Some(event.overlay));
                route(event);
            }),
        ));
        overlay.show()?;

        info!(%screen, overlay = id.0, ?theme, "显示覆盖层");
        self.overlay = Some(TrackedOverlay { id, overlay });
        Ok(ActivateOutcome::Shown { overlay: id, theme })
    }

    /// 覆盖层关闭
    ///
    /// 无条件终止宿主界面。重复或过期的通知被忽略。
    pub fn on_overlay_dismissed(&mut self, event: DismissEvent) -> Result<DismissOutcome, TerminationError> {
        let screen = self.screen.id();

        if event.screen != screen {
            warn!(%screen, from = %event.screen, "收到其他界面的 dismiss 通知");
            return Ok(DismissOutcome::Ignored);
        }

        let tracked = matches!(&self.overlay, Some(tracked) if tracked.id == event.overlay);
        if !tracked && self.dismissed.get() != Some(event.overlay) {
            debug!(%screen, overlay = event.overlay.0, "忽略重复或过期的 dismiss 通知");
            return Ok(DismissOutcome::Ignored);
        }

        self.overlay = None;
        self.terminate(TerminationMode::Default)
    }

    fn terminate(&mut self, mode: TerminationMode) -> Result<DismissOutcome, TerminationError> {
        if !self.screen.mark_terminated() {
            return Ok(DismissOutcome::Ignored);
        }
        info!(screen = %self.screen.id(), ?mode, "终止界面");
        self.terminator.terminate(self.screen.id(), mode)?;
        Ok(DismissOutcome::Terminated)
    }
}
