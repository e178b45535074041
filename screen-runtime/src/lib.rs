//! # Screen Runtime
//!
//! 生命周期绑定的模态覆盖层与延迟自关闭界面的核心逻辑库。
//!
//! ## 架构概述
//!
//! `screen-runtime` 是纯逻辑核心，不依赖任何 IO、渲染或异步运行时。
//! 宿主层（Host）负责派发生命周期事件，并通过 trait 注入外部协作者：
//!
//! ```text
//! Host                                   Runtime
//!   │                                       │
//!   │──── LifecycleEvent ──────────────────►│ on_lifecycle()
//!   │──── DismissEvent / TimerHandle ──────►│ on_overlay_dismissed() / on_timer_fired()
//!   │                                       │
//!   │◄─── ThemeResolver / OverlayFactory ───│
//!   │◄─── Scheduler / Terminator ───────────│
//! ```
//!
//! ## 核心类型
//!
//! - [`ModalOverlayCoordinator`]：保证每个界面至多一个可见覆盖层，覆盖层关闭即终止界面
//! - [`DelayedSelfDismissScreen`]：激活后立即上报结果，并在固定延迟后自行终止
//! - [`HostScreen`]：显式建模的界面生命周期状态机
//! - [`ManualScheduler`]：虚拟时钟调度器，用于无头宿主与测试
//!
//! ## 模块结构
//!
//! - [`lifecycle`]：界面生命周期状态机
//! - [`theme`]：主题变体与主题解析
//! - [`overlay`]：覆盖层抽象与一次性 dismiss 通知
//! - [`scheduler`]：定时器调度抽象
//! - [`termination`]：终止与启动结果接口
//! - [`coordinator`]：模态覆盖层协调器
//! - [`self_dismiss`]：延迟自关闭界面
//! - [`reminder`]：捐赠提醒日历与策略
//! - [`preferences`]：偏好存储
//! - [`suggestions`]：只读搜索建议桩
//! - [`error`]：错误类型定义

pub mod coordinator;
pub mod error;
pub mod lifecycle;
pub mod overlay;
pub mod preferences;
pub mod reminder;
pub mod scheduler;
pub mod self_dismiss;
pub mod suggestions;
pub mod termination;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

// 重导出核心类型
pub use coordinator::{ActivateOutcome, CoordinatorState, DismissOutcome, ModalOverlayCoordinator};
pub use error::{
    LifecycleError, OverlayError, PreferenceError, ScreenError, ScreenResult, TerminationError,
};
pub use lifecycle::{HostScreen, LifecycleEvent, ScreenId, ScreenPhase};
pub use overlay::{DismissEvent, DismissRoute, DismissSink, Overlay, OverlayFactory, OverlayId};
pub use preferences::{MemoryPreferences, PrefValue, Preferences, USAGE_COUNT_KEY};
pub use reminder::{
    DISMISSED_DONATE_REMINDER_KEY, NO_DONATION_REMINDER_KEY, ReminderAction, ReminderLayout,
    ReminderPolicy, ReminderResponse, ReminderWindow, reminder_calendar,
};
pub use scheduler::{Expiry, ManualScheduler, Scheduler, TimerHandle};
pub use self_dismiss::{
    CLOSE_IMMEDIATELY_DELAY, DelayedSelfDismissScreen, ScheduledTermination, SelfDismissOutcome,
};
pub use suggestions::{MockSuggestionProvider, SuggestionQuery, SuggestionRow};
pub use termination::{LaunchResultSink, LaunchStatus, TerminationMode, Terminator};
pub use theme::{FixedTheme, ThemeResolver, ThemeVariant};
