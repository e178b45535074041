//! # Screen Host
//!
//! screen-runtime 的宿主实现：单线程 tokio 事件循环、控制台覆盖层、
//! 文件配置与偏好存储。
//!
//! ## 模块结构
//!
//! - [`config`]：配置加载与验证
//! - [`driver`]：事件循环与宿主事件
//! - [`bridge`]：把终止、启动结果与 dismiss 通知接到事件通道
//! - [`scheduler`]：基于 tokio 定时器的调度器
//! - [`overlay`]：控制台覆盖层
//! - [`theme`]：由配置决定的主题解析
//! - [`preferences`]：JSON 文件偏好存储
//! - [`screens`]：可运行的界面
//! - [`logging`]：日志初始化
//! - [`error`]：宿主层错误

pub mod bridge;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod overlay;
pub mod preferences;
pub mod scheduler;
pub mod screens;
pub mod theme;

pub use config::{ConfigError, HostConfig, ReminderConfig, ThemeSetting};
pub use driver::{EventReceiver, EventSender, HostDriver, HostEvent, RunReport, UserAction, channel};
pub use error::{HostError, HostResult};
pub use preferences::JsonPreferences;
pub use screens::{AboutScreen, CloseImmediatelyScreen, DonateReminderScreen, Screen};
