//! # Scheduler 模块
//!
//! 定时器调度抽象。
//!
//! ## 设计说明
//!
//! - 调度不阻塞调用线程，到期时由宿主在同一逻辑线程上回调
//!   （例如 `DelayedSelfDismissScreen::on_timer_fired`）
//! - [`ManualScheduler`] 使用虚拟时钟，时间只在调用 [`ManualScheduler::advance`] 时流逝

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::lifecycle::ScreenId;

/// 定时器句柄，用于取消
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// 定时器调度接口
pub trait Scheduler {
    /// 在 `delay` 之后为 `screen` 投递一次到期通知
    fn schedule(&mut self, delay: Duration, screen: ScreenId) -> TimerHandle;

    /// 取消尚未到期的定时器，返回是否确实取消了
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// 到期的定时器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub handle: TimerHandle,
    pub screen: ScreenId,
    /// 到期时刻（虚拟时钟）
    pub due: Duration,
}

#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    next_handle: u64,
    pending: Vec<Expiry>,
}

/// 虚拟时钟调度器
///
/// 克隆共享同一个时钟，便于界面持有一份、驱动方持有另一份。
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前虚拟时间
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// 尚未到期的定时器数量
    pub fn pending_count(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// 推进时钟，返回期间到期的定时器（按到期时间排序）
    pub fn advance(&self, by: Duration) -> Vec<Expiry> {
        let mut clock = self.clock.borrow_mut();
        clock.now += by;
        let now = clock.now;

        let (mut due, pending): (Vec<Expiry>, Vec<Expiry>) =
            clock.pending.drain(..).partition(|timer| timer.due <= now);
        clock.pending = pending;

        due.sort_by_key(|timer| (timer.due, timer.handle));
        due
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, screen: ScreenId) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        let handle = TimerHandle(clock.next_handle);
        clock.next_handle += 1;
        let due = clock.now + delay;
        clock.pending.push(Expiry {
            handle,
            screen,
            due,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let mut clock = self.clock.borrow_mut();
        let before = clock.pending.len();
        clock.pending.retain(|timer| timer.handle != handle);
        clock.pending.len() != before
    }
}
