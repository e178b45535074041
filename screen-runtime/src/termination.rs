//! # Termination 模块
//!
//! 界面终止与启动结果的外部接口。

use serde::{Deserialize, Serialize};

use crate::error::TerminationError;
use crate::lifecycle::ScreenId;

/// 终止方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationMode {
    /// 使用宿主默认的过渡动画
    Default,
    /// 静默终止，跳过过渡动画
    SuppressTransition,
}

/// 启动结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchStatus {
    Ok,
    Canceled,
}

/// 终止宿主界面
pub trait Terminator {
    fn terminate(&mut self, screen: ScreenId, mode: TerminationMode)
    -> Result<(), TerminationError>;
}

/// 向启动方上报结果
///
/// 必须在终止之前调用，启动方才能观察到结果。
pub trait LaunchResultSink {
    fn set_result(&mut self, screen: ScreenId, status: LaunchStatus);
}
