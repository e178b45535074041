//! # Screen Host
//!
//! 在终端里运行界面。
//!
//! ## 用法
//!
//! ```bash
//! screen-host about --dismiss-after-ms 800
//! screen-host close
//! screen-host reminder --date 2026-09-20 --response not-now
//! screen-host --config my.json --log-level debug close
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use screen_host::{
    AboutScreen, CloseImmediatelyScreen, DonateReminderScreen, HostConfig, HostDriver, HostEvent,
    JsonPreferences, RunReport, Screen, UserAction, channel, logging,
};
use screen_runtime::{Preferences, ReminderResponse, ScreenId};

#[derive(Parser)]
#[command(name = "screen-host")]
#[command(about = "运行模态覆盖层与延迟自关闭界面")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认：config.json）
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// 日志级别，覆盖配置文件
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示"关于"覆盖层，稍后模拟用户关闭
    About {
        /// 多久之后关闭覆盖层（毫秒）
        #[arg(long, default_value = "1500")]
        dismiss_after_ms: u64,
    },

    /// 启动后立即返回结果并静默关闭
    Close,

    /// 检查并显示捐赠提醒
    Reminder {
        /// 以此日期为今天（默认：本地日期）
        #[arg(long)]
        date: Option<NaiveDate>,

        /// 模拟的用户回应
        #[arg(long, value_enum, default_value_t = ResponseArg::NotNow)]
        response: ResponseArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResponseArg {
    Donate,
    NotNow,
}

impl From<ResponseArg> for ReminderResponse {
    fn from(arg: ResponseArg) -> Self {
        match arg {
            ResponseArg::Donate => ReminderResponse::Donate,
            ResponseArg::NotNow => ReminderResponse::NotNow,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 日志级别取决于配置，先读取配置再安装 subscriber，之后补记加载结果
    let loaded = HostConfig::read(&cli.config)
        .with_context(|| format!("加载配置失败: {}", cli.config.display()))?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    logging::init(&config.log_level);
    if found {
        info!(path = ?cli.config, "配置文件加载成功");
    } else {
        warn!(path = ?cli.config, "配置文件不存在，使用默认配置");
    }
    config.validate()?;

    let (tx, rx) = channel();
    let screen: Box<dyn Screen> = match cli.command {
        Commands::About { dismiss_after_ms } => {
            let dismiss = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(dismiss_after_ms)).await;
                let _ = dismiss.send(HostEvent::User(UserAction::DismissOverlay));
            });
            Box::new(AboutScreen::new(ScreenId(1), &config, tx.clone()))
        }
        Commands::Close => Box::new(CloseImmediatelyScreen::new(ScreenId(2), &config, tx.clone())),
        Commands::Reminder { date, response } => {
            let mut prefs = JsonPreferences::open(&config.preferences_path)?;
            prefs.increment_usage_count()?;

            if !config.reminder.enabled {
                println!("捐赠提醒已在配置中关闭");
                return Ok(());
            }

            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let policy = config.reminder_policy();
            let Some(window) = policy.due_reminder(&mut prefs, today)? else {
                println!("{today} 没有需要显示的提醒");
                return Ok(());
            };
            info!(key = %window.key, %today, "显示捐赠提醒");

            let layout = policy.layout_for(today).unwrap_or(window.layout);
            tx.send(HostEvent::User(UserAction::Respond(response.into())))?;
            Box::new(DonateReminderScreen::new(ScreenId(3), &config, layout, prefs, tx.clone()))
        }
    };

    drop(tx);
    let report = HostDriver::new(screen, rx).run().await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    if let Some((status, at)) = report.launch_result {
        println!("启动结果: {status:?} ({} ms)", at.as_millis());
    }
    if let Some(theme) = report.overlay_theme {
        println!("覆盖层主题: {theme:?}");
    }
    if report.overlay_failures > 0 {
        println!("覆盖层显示失败: {} 次", report.overlay_failures);
    }
    match report.finished {
        Some((mode, at)) => println!("界面已终止: {mode:?} ({} ms)", at.as_millis()),
        None if report.destroyed_by_host => println!("界面被宿主销毁"),
        None => println!("界面未终止"),
    }
}
