//! # 控制台覆盖层
//!
//! 无窗口环境下的覆盖层实现：显示即输出一条日志，关闭时触发 dismiss 通知。

use tracing::info;

use screen_runtime::{DismissSink, Overlay, OverlayError, OverlayFactory, OverlayId, ThemeVariant};

/// 控制台覆盖层
#[derive(Debug)]
pub struct ConsoleOverlay {
    id: OverlayId,
    title: String,
    body: String,
    theme: ThemeVariant,
    visible: bool,
    sink: Option<DismissSink>,
}

impl ConsoleOverlay {
    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// 关闭覆盖层并触发 dismiss 通知
    ///
    /// 返回是否真正投递了通知。
    pub fn dismiss(&mut self) -> bool {
        self.visible = false;
        self.sink.as_mut().is_some_and(DismissSink::fire)
    }

    /// 覆盖层被系统隐藏（例如短暂中断），不投递 dismiss
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl Overlay for ConsoleOverlay {
    fn show(&mut self) -> Result<(), OverlayError> {
        if self.sink.is_none() {
            return Err(OverlayError::Show {
                message: format!("覆盖层 {} 没有注册 dismiss 通知", self.id.0),
            });
        }
        self.visible = true;
        info!(overlay = self.id.0, theme = ?self.theme, title = %self.title, "{}", self.body);
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

/// 控制台覆盖层工厂
#[derive(Debug, Clone)]
pub struct ConsoleOverlayFactory {
    title: String,
    body: String,
}

impl ConsoleOverlayFactory {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl OverlayFactory for ConsoleOverlayFactory {
    type Overlay = ConsoleOverlay;

    fn create(&mut self, id: OverlayId, theme: ThemeVariant) -> Result<ConsoleOverlay, OverlayError> {
        if self.title.is_empty() {
            return Err(OverlayError::Construction {
                message: "覆盖层标题为空".to_string(),
            });
        }
        Ok(ConsoleOverlay {
            id,
            title: self.title.clone(),
            body: self.body.clone(),
            theme,
            visible: false,
            sink: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screen_runtime::{DismissEvent, ScreenId};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_show_requires_sink() {
        let mut factory = ConsoleOverlayFactory::new("About", "v1");
        let mut overlay = factory.create(OverlayId(0), ThemeVariant::Light).unwrap();

        assert!(matches!(overlay.show(), Err(OverlayError::Show { .. })));
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_dismiss_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();

        let mut factory = ConsoleOverlayFactory::new("About", "v1");
        let mut overlay = factory.create(OverlayId(0), ThemeVariant::Dark).unwrap();
        overlay.set_dismiss_sink(DismissSink::new(
            DismissEvent {
                screen: ScreenId(1),
                overlay: OverlayId(0),
            },
            Rc::new(move |_: DismissEvent| counter.set(counter.get() + 1)),
        ));
        overlay.show().unwrap();
        assert!(overlay.is_visible());

        assert!(overlay.dismiss());
        assert!(!overlay.dismiss());
        assert!(!overlay.is_visible());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_empty_title_fails_construction() {
        let mut factory = ConsoleOverlayFactory::new("", "");
        assert!(matches!(
            factory.create(OverlayId(0), ThemeVariant::Dark),
            Err(OverlayError::Construction { .. })
        ));
    }
}
