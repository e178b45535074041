//! # Error 模块
//!
//! 宿主层错误类型。

use std::path::PathBuf;
use thiserror::Error;

use screen_runtime::ScreenError;

/// 宿主层错误
#[derive(Error, Debug)]
pub enum HostError {
    /// 文件读写失败
    #[error("无法访问 {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 格式错误
    #[error("{path:?} 不是有效的 JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 界面逻辑错误
    #[error(transparent)]
    Screen(#[from] ScreenError),

    /// 事件循环在界面终止前断开
    #[error("事件通道已关闭，界面 {0} 未能完成")]
    ChannelClosed(screen_runtime::ScreenId),
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
