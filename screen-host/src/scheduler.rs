//! # Tokio 调度器
//!
//! 每个定时器是一个 sleep 任务，到期后向事件循环投递 [`HostEvent::TimerFired`]，
//! 回调因此总在事件循环所在的线程上执行。取消即 abort 对应任务。

use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;

use screen_runtime::{ScreenId, Scheduler, TimerHandle};

use crate::driver::{EventSender, HostEvent};

/// 基于 tokio 定时器的调度器
///
/// 必须在 tokio 运行时内使用。
pub struct TokioScheduler {
    tx: EventSender,
    next_handle: u64,
    timers: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: EventSender) -> Self {
        Self {
            tx,
            next_handle: 0,
            timers: HashMap::new(),
        }
    }

    /// 尚未到期的定时器数量
    pub fn active_count(&self) -> usize {
        self.timers.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, screen: ScreenId) -> TimerHandle {
        self.timers.retain(|_, task| !task.is_finished());

        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(HostEvent::TimerFired { screen, handle });
        });
        self.timers.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.timers.remove(&handle) {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            _ => false,
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.timers.drain() {
            task.abort();
        }
    }
}
