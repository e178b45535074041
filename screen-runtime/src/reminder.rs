//! # Reminder 模块
//!
//! 捐赠提醒的日历与弹出策略。
//!
//! ## 规则
//!
//! - 用户关闭了捐赠提醒（`NoDonationReminder`）时从不提醒
//! - 使用次数不超过 `min_usage_count` 时不提醒
//! - 否则取第一个处于有效期、且尚未提醒过的窗口，记录其 key 后返回
//!
//! 提醒界面本身由 [`crate::ModalOverlayCoordinator`] 承载，
//! 用户作出回应后覆盖层关闭，界面随之终止。

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PreferenceError;
use crate::preferences::{Preferences, USAGE_COUNT_KEY};

/// 用户关闭捐赠提醒的设置项
pub const NO_DONATION_REMINDER_KEY: &str = "NoDonationReminder";

/// 用户在提醒界面选择"以后再说"
pub const DISMISSED_DONATE_REMINDER_KEY: &str = "DismissedDonateReminder";

/// 固定日历覆盖到的最后一年，之后按规则生成
const LAST_SCHEDULED_YEAR: i32 = 2028;

/// 提醒界面的内容布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderLayout {
    Donate,
    Birthday,
    BirthdayMissed,
}

/// 提醒窗口，有效期为 `[from, to)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub key: String,
    pub layout: ReminderLayout,
}

impl ReminderWindow {
    fn new(
        from: (i32, u32, u32),
        to: (i32, u32, u32),
        key: impl Into<String>,
        layout: ReminderLayout,
    ) -> Option<Self> {
        Some(Self {
            from: NaiveDate::from_ymd_opt(from.0, from.1, from.2)?,
            to: NaiveDate::from_ymd_opt(to.0, to.1, to.2)?,
            key: key.into(),
            layout,
        })
    }

    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.from <= today && today < self.to
    }
}

/// 以 `year` 为当前年份的提醒日历
pub fn reminder_calendar(year: i32) -> Vec<ReminderWindow> {
    use ReminderLayout::*;

    let mut windows = vec![
        ReminderWindow::new((2024, 9, 21), (2024, 9, 28), "DonationOktoberfest2024", Donate),
        ReminderWindow::new((2024, 9, 28), (2024, 10, 8), "DonationOktoberfest2024-2", Donate),
        ReminderWindow::new((2025, 9, 20), (2025, 9, 28), "DonationOktoberfest2025-1", Donate),
        ReminderWindow::new((2025, 9, 28), (2025, 10, 7), "DonationOktoberfest2025-2", Donate),
        ReminderWindow::new((2026, 9, 19), (2026, 9, 28), "DonationOktoberfest2026-1", Donate),
        ReminderWindow::new((2026, 9, 28), (2026, 10, 6), "DonationOktoberfest2026-2", Donate),
        ReminderWindow::new((2027, 9, 18), (2027, 9, 26), "DonationOktoberfest2027-1", Donate),
        ReminderWindow::new((2027, 9, 26), (2027, 10, 5), "DonationOktoberfest2027-2", Donate),
        ReminderWindow::new((2028, 9, 16), (2028, 9, 26), "DonationOktoberfest2028-1", Donate),
        ReminderWindow::new((2028, 9, 26), (2028, 10, 5), "DonationOktoberfest2028-2", Donate),
    ];

    if year > LAST_SCHEDULED_YEAR {
        windows.push(ReminderWindow::new(
            (year, 9, 20),
            (year, 9, 26),
            format!("DonationOktoberfest{year}-1"),
            Donate,
        ));
        windows.push(ReminderWindow::new(
            (year, 9, 26),
            (year, 10, 8),
            format!("DonationOktoberfest{year}-2"),
            Donate,
        ));
    }

    // 生日提醒：当天与之后一周共用同一个 key
    let birthday_key = format!("DonationBirthday{year}");
    windows.push(ReminderWindow::new(
        (year, 5, 10),
        (year, 5, 11),
        birthday_key.clone(),
        Birthday,
    ));
    windows.push(ReminderWindow::new(
        (year, 5, 11),
        (year, 5, 18),
        birthday_key,
        BirthdayMissed,
    ));

    windows.into_iter().flatten().collect()
}

/// 提醒策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    /// 使用次数必须超过此值才会提醒
    pub min_usage_count: u64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self { min_usage_count: 5 }
    }
}

impl ReminderPolicy {
    /// 判断今天是否需要弹出提醒
    ///
    /// 返回的窗口 key 会被立即记录，同一窗口不会提醒第二次。
    pub fn due_reminder<P>(
        &self,
        prefs: &mut P,
        today: NaiveDate,
    ) -> Result<Option<ReminderWindow>, PreferenceError>
    where
        P: Preferences + ?Sized,
    {
        if prefs.get_bool(NO_DONATION_REMINDER_KEY).unwrap_or(false) {
            debug!("捐赠提醒已被用户关闭");
            return Ok(None);
        }

        let usage = prefs.get_u64(USAGE_COUNT_KEY).unwrap_or(0);
        if usage <= self.min_usage_count {
            debug!(usage, "使用次数不足，不提醒");
            return Ok(None);
        }

        for window in reminder_calendar(today.year()) {
            if window.is_active(today) && !prefs.get_bool(&window.key).unwrap_or(false) {
                prefs.put_bool(&window.key, true)?;
                return Ok(Some(window));
            }
        }
        Ok(None)
    }

    /// 提醒界面应使用的布局：今天有效的最后一个窗口
    pub fn layout_for(&self, today: NaiveDate) -> Option<ReminderLayout> {
        reminder_calendar(today.year())
            .into_iter()
            .filter(|window| window.is_active(today))
            .last()
            .map(|window| window.layout)
    }
}

/// 用户在提醒界面的回应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderResponse {
    /// 前往捐赠
    Donate,
    /// 以后再说
    NotNow,
}

/// 回应之后宿主需要执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    /// 打开捐赠页面
    OpenDonatePage,
    /// 已记录用户的拒绝
    RememberedDismissal,
}

impl ReminderResponse {
    /// 应用回应，必要时写入偏好
    pub fn apply<P>(self, prefs: &mut P) -> Result<ReminderAction, PreferenceError>
    where
        P: Preferences + ?Sized,
    {
        match self {
            Self::Donate => Ok(ReminderAction::OpenDonatePage),
            Self::NotNow => {
                prefs.put_bool(DISMISSED_DONATE_REMINDER_KEY, true)?;
                Ok(ReminderAction::RememberedDismissal)
            }
        }
    }
}
