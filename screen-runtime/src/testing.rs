//! 测试用的记录型协作者

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::error::{OverlayError, TerminationError};
use crate::lifecycle::ScreenId;
use crate::overlay::{DismissEvent, DismissRoute, DismissSink, Overlay, OverlayFactory, OverlayId};
use crate::scheduler::ManualScheduler;
use crate::termination::{LaunchResultSink, LaunchStatus, TerminationMode, Terminator};
use crate::theme::{ThemeResolver, ThemeVariant};

/// 协作者被调用的记录
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ThemeResolved(ThemeVariant),
    Created(OverlayId, ThemeVariant),
    Shown(OverlayId),
    Terminated(ScreenId, TerminationMode),
    Result(ScreenId, LaunchStatus),
}

/// 共享调用日志，可选地附带虚拟时钟时间戳
#[derive(Clone, Default)]
pub struct Journal {
    calls: Rc<RefCell<Vec<(Duration, Call)>>>,
    clock: Option<ManualScheduler>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: ManualScheduler) -> Self {
        Self {
            calls: Rc::default(),
            clock: Some(clock),
        }
    }

    pub fn record(&self, call: Call) {
        let now = self.clock.as_ref().map(|c| c.now()).unwrap_or_default();
        self.calls.borrow_mut().push((now, call));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn timed(&self) -> Vec<(Duration, Call)> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|(_, c)| pred(c)).count()
    }
}

/// 按序列依次返回主题的解析器
pub struct SequenceTheme {
    journal: Journal,
    sequence: Vec<ThemeVariant>,
    next: Cell<usize>,
    fail: Cell<bool>,
}

impl SequenceTheme {
    pub fn new(journal: &Journal, sequence: Vec<ThemeVariant>) -> Self {
        Self {
            journal: journal.clone(),
            sequence,
            next: Cell::new(0),
            fail: Cell::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl ThemeResolver for SequenceTheme {
    fn resolve_theme_variant(&self) -> Result<ThemeVariant, OverlayError> {
        if self.fail.get() {
            return Err(OverlayError::ThemeResolution {
                message: "resolver offline".to_string(),
            });
        }
        let index = self.next.get();
        self.next.set(index + 1);
        let theme = self.sequence[index % self.sequence.len()];
        self.journal.record(Call::ThemeResolved(theme));
        Ok(theme)
    }
}

pub struct FakeOverlay {
    pub id: OverlayId,
    theme: ThemeVariant,
    visible: bool,
    sink: Option<DismissSink>,
    journal: Journal,
    fail_show: bool,
}

impl FakeOverlay {
    /// 用户手势关闭
    pub fn dismiss(&mut self) -> bool {
        self.visible = false;
        self.sink.as_mut().is_some_and(|sink| sink.fire())
    }

    /// 系统隐藏覆盖层但没有投递 dismiss
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// 绕过一次性语义，直接再投递一次事件
    pub fn sink_event(&self) -> Option<DismissEvent> {
        self.sink.as_ref().map(|sink| sink.event())
    }
}

impl Overlay for FakeOverlay {
    fn show(&mut self) -> Result<(), OverlayError> {
        if self.fail_show {
            return Err(OverlayError::Show {
                message: "window token revoked".to_string(),
            });
        }
        self.visible = true;
        self.journal.record(Call::Shown(self.id));
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_dismiss_sink(&mut self, sink: DismissSink) {
        self.sink = Some(sink);
    }

    fn theme(&self) -> ThemeVariant {
        self.theme
    }
}

#[derive(Clone, Default)]
pub struct FakeFactory {
    journal: Journal,
    fail_create: Rc<Cell<bool>>,
    fail_show: Rc<Cell<bool>>,
}

impl FakeFactory {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Self::default()
        }
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    pub fn set_fail_show(&self, fail: bool) {
        self.fail_show.set(fail);
    }
}

impl OverlayFactory for FakeFactory {
    type Overlay = FakeOverlay;

    fn create(&mut self, id: OverlayId, theme: ThemeVariant) -> Result<FakeOverlay, OverlayError> {
        if self.fail_create.get() {
            return Err(OverlayError::Construction {
                message: "layout inflation failed".to_string(),
            });
        }
        self.journal.record(Call::Created(id, theme));
        Ok(FakeOverlay {
            id,
            theme,
            visible: false,
            sink: None,
            journal: self.journal.clone(),
            fail_show: self.fail_show.get(),
        })
    }
}

pub struct FakeTerminator {
    journal: Journal,
    fail: bool,
}

impl FakeTerminator {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: false,
        }
    }

    pub fn failing(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: true,
        }
    }
}

impl Terminator for FakeTerminator {
    fn terminate(
        &mut self,
        screen: ScreenId,
        mode: TerminationMode,
    ) -> Result<(), TerminationError> {
        self.journal.record(Call::Terminated(screen, mode));
        if self.fail {
            return Err(TerminationError {
                screen,
                message: "host refused to finish".to_string(),
            });
        }
        Ok(())
    }
}

pub struct FakeResults {
    journal: Journal,
}

impl FakeResults {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl LaunchResultSink for FakeResults {
    fn set_result(&mut self, screen: ScreenId, status: LaunchStatus) {
        self.journal.record(Call::Result(screen, status));
    }
}

/// 把 dismiss 事件收集到队列中，由测试手动派发
pub fn collecting_route() -> (DismissRoute, Rc<RefCell<Vec<DismissEvent>>>) {
    let queue = Rc::new(RefCell::new(Vec::new()));
    let sink = queue.clone();
    let route: DismissRoute = Rc::new(move |event: DismissEvent| sink.borrow_mut().push(event));
    (route, queue)
}
