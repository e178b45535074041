//! 端到端流程测试：在暂停的 tokio 时钟上运行完整事件循环。

use std::time::Duration;

use chrono::NaiveDate;
use screen_host::{
    AboutScreen, CloseImmediatelyScreen, DonateReminderScreen, EventSender, HostConfig, HostDriver,
    HostError, HostEvent, JsonPreferences, Screen, ThemeSetting, UserAction, channel,
};
use screen_runtime::{
    DISMISSED_DONATE_REMINDER_KEY, LaunchStatus, LifecycleEvent, OverlayError, Preferences,
    ReminderLayout, ReminderResponse, ScreenId, ScreenResult, TerminationMode, ThemeVariant,
    USAGE_COUNT_KEY,
};

/// 第一次激活时覆盖层构造失败，第二次激活后立即请求终止
struct FlakyScreen {
    id: ScreenId,
    activations: usize,
    tx: EventSender,
}

impl Screen for FlakyScreen {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn on_lifecycle(&mut self, event: LifecycleEvent) -> ScreenResult<()> {
        if event != LifecycleEvent::Resumed {
            return Ok(());
        }
        self.activations += 1;
        if self.activations == 1 {
            return Err(OverlayError::Construction {
                message: "layout inflation failed".to_string(),
            }
            .into());
        }
        let _ = self.tx.send(HostEvent::Finished {
            screen: self.id,
            mode: TerminationMode::Default,
        });
        Ok(())
    }
}

/// 不持有发送端、也不会自行终止的界面
struct IdleScreen(ScreenId);

impl Screen for IdleScreen {
    fn id(&self) -> ScreenId {
        self.0
    }

    fn on_lifecycle(&mut self, _event: LifecycleEvent) -> ScreenResult<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_close_screen_reports_then_terminates_silently() {
    let (tx, rx) = channel();
    let screen = CloseImmediatelyScreen::new(ScreenId(2), &HostConfig::default(), tx.clone());

    let report = HostDriver::new(Box::new(screen), rx).run().await.unwrap();

    let (status, reported_at) = report.launch_result.unwrap();
    assert_eq!(status, LaunchStatus::Ok);
    assert!(reported_at < Duration::from_millis(200));

    let (mode, finished_at) = report.finished.unwrap();
    assert_eq!(mode, TerminationMode::SuppressTransition);
    assert!(finished_at >= Duration::from_millis(200));
    assert!(!report.destroyed_by_host);
}

#[tokio::test(start_paused = true)]
async fn test_close_screen_destroyed_before_delay() {
    let (tx, rx) = channel();
    let screen = CloseImmediatelyScreen::new(ScreenId(2), &HostConfig::default(), tx.clone());
    let host = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        host.send(HostEvent::Lifecycle(LifecycleEvent::Destroyed)).unwrap();
    });

    let report = HostDriver::new(Box::new(screen), rx).run().await.unwrap();

    assert!(report.destroyed_by_host);
    assert_eq!(report.finished, None);
    assert_eq!(report.launch_result.map(|(status, _)| status), Some(LaunchStatus::Ok));
}

#[tokio::test(start_paused = true)]
async fn test_about_screen_terminates_on_dismiss() {
    let config = HostConfig {
        theme: ThemeSetting::Light,
        ..HostConfig::default()
    };
    let (tx, rx) = channel();
    let screen = AboutScreen::new(ScreenId(1), &config, tx.clone());

    // 覆盖层可见时再次激活不会产生第二个覆盖层
    tx.send(HostEvent::Lifecycle(LifecycleEvent::Paused)).unwrap();
    tx.send(HostEvent::Lifecycle(LifecycleEvent::Resumed)).unwrap();
    tx.send(HostEvent::User(UserAction::DismissOverlay)).unwrap();
    tx.send(HostEvent::User(UserAction::DismissOverlay)).unwrap();

    let report = HostDriver::new(Box::new(screen), rx).run().await.unwrap();

    assert_eq!(report.overlay_theme, Some(ThemeVariant::Light));
    assert_eq!(report.overlay_failures, 0);
    assert_eq!(report.launch_result, None);
    assert_eq!(report.finished.map(|(mode, _)| mode), Some(TerminationMode::Default));
}

#[tokio::test(start_paused = true)]
async fn test_about_screen_terminates_when_resumed_before_dismiss_arrives() {
    let (tx, rx) = channel();
    let screen = AboutScreen::new(ScreenId(1), &HostConfig::default(), tx.clone());

    // dismiss 通知排在暂停与恢复之后才送达
    tx.send(HostEvent::User(UserAction::DismissOverlay)).unwrap();
    tx.send(HostEvent::Lifecycle(LifecycleEvent::Paused)).unwrap();
    tx.send(HostEvent::Lifecycle(LifecycleEvent::Resumed)).unwrap();

    let report = tokio::time::timeout(
        Duration::from_secs(5),
        HostDriver::new(Box::new(screen), rx).run(),
    )
    .await
    .expect("覆盖层关闭后界面应当终止")
    .unwrap();

    assert_eq!(report.finished.map(|(mode, _)| mode), Some(TerminationMode::Default));
}

#[tokio::test(start_paused = true)]
async fn test_overlay_failure_is_counted_and_retried() {
    let (tx, rx) = channel();
    let screen = FlakyScreen {
        id: ScreenId(5),
        activations: 0,
        tx: tx.clone(),
    };
    tx.send(HostEvent::Lifecycle(LifecycleEvent::Resumed)).unwrap();

    let report = HostDriver::new(Box::new(screen), rx).run().await.unwrap();

    assert_eq!(report.overlay_failures, 1);
    assert_eq!(report.finished.map(|(mode, _)| mode), Some(TerminationMode::Default));
}

#[tokio::test(start_paused = true)]
async fn test_run_fails_when_all_senders_are_gone() {
    let (tx, rx) = channel();
    tx.send(HostEvent::Lifecycle(LifecycleEvent::Paused)).unwrap();
    drop(tx);

    let result = HostDriver::new(Box::new(IdleScreen(ScreenId(6))), rx).run().await;

    assert!(matches!(result, Err(HostError::ChannelClosed(ScreenId(6)))));
}

#[tokio::test(start_paused = true)]
async fn test_reminder_flow_persists_response() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let config = HostConfig {
        preferences_path: path.clone(),
        ..HostConfig::default()
    };
    let today = NaiveDate::from_ymd_opt(2026, 9, 20).unwrap();

    let mut prefs = JsonPreferences::open(&path).unwrap();
    for _ in 0..6 {
        prefs.increment_usage_count().unwrap();
    }
    let window = config
        .reminder_policy()
        .due_reminder(&mut prefs, today)
        .unwrap()
        .unwrap();
    assert_eq!(window.key, "DonationOktoberfest2026-1");
    assert_eq!(window.layout, ReminderLayout::Donate);

    let (tx, rx) = channel();
    tx.send(HostEvent::User(UserAction::Respond(ReminderResponse::NotNow)))
        .unwrap();
    let screen = DonateReminderScreen::new(ScreenId(3), &config, window.layout, prefs, tx.clone());

    let report = HostDriver::new(Box::new(screen), rx).run().await.unwrap();
    assert_eq!(report.finished.map(|(mode, _)| mode), Some(TerminationMode::Default));

    let mut reopened = JsonPreferences::open(&path).unwrap();
    assert_eq!(reopened.get_u64(USAGE_COUNT_KEY), Some(6));
    assert_eq!(reopened.get_bool(DISMISSED_DONATE_REMINDER_KEY), Some(true));
    assert_eq!(reopened.get_bool("DonationOktoberfest2026-1"), Some(true));

    // 同一窗口不会再次提醒
    assert_eq!(
        config.reminder_policy().due_reminder(&mut reopened, today).unwrap(),
        None
    );
}
