//! Viewport classification.
//!
//! The layout shell renders a drawer sider on narrow screens. It learns the
//! screen class by subscribing to a [`ViewportClassifier`] when mounted and
//! unsubscribing when torn down; the boolean lives in the shell itself.

use crate::info_log;
use std::collections::HashMap;

/// Widths up to this many pixels count as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 767;

/// Responsive screen classes, by viewport width in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenClass {
    /// up to 575
    Xs,
    /// 576 to 767
    Sm,
    /// 768 to 991
    Md,
    /// 992 to 1199
    Lg,
    /// 1200 and up
    Xl,
}

impl ScreenClass {
    pub fn from_width(width: u32) -> Self {
        match width {
            0..=575 => ScreenClass::Xs,
            576..=767 => ScreenClass::Sm,
            768..=991 => ScreenClass::Md,
            992..=1199 => ScreenClass::Lg,
            _ => ScreenClass::Xl,
        }
    }

    /// CSS class name applied to the layout container.
    pub fn css_class(self) -> &'static str {
        match self {
            ScreenClass::Xs => "screen-xs",
            ScreenClass::Sm => "screen-sm",
            ScreenClass::Md => "screen-md",
            ScreenClass::Lg => "screen-lg",
            ScreenClass::Xl => "screen-xl",
        }
    }

    pub fn is_mobile(self) -> bool {
        self <= ScreenClass::Sm
    }
}

/// Handle returned by [`ViewportClassifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback receiving the new mobile flag.
pub type ViewportListener = Box<dyn Fn(bool) + Send + Sync>;

/// Source of mobile/desktop classification changes.
pub trait ViewportClassifier {
    /// Register a listener. It is called immediately with the current flag
    /// and again on every change.
    fn subscribe(&mut self, listener: ViewportListener) -> SubscriptionId;

    /// Drop a listener. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Current classification.
    fn is_mobile(&self) -> bool;
}

/// In-process classifier fed with viewport widths, e.g. from resize events.
pub struct MediaQueryWatcher {
    width: u32,
    next_id: u64,
    listeners: HashMap<SubscriptionId, ViewportListener>,
}

impl MediaQueryWatcher {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            next_id: 0,
            listeners: HashMap::new(),
        }
    }

    /// Current width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current screen class.
    pub fn screen_class(&self) -> ScreenClass {
        ScreenClass::from_width(self.width)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Update the width. Listeners are notified only when the mobile flag
    /// flips.
    pub fn resize(&mut self, width: u32) {
        let was_mobile = self.is_mobile();
        self.width = width;
        let mobile = self.is_mobile();
        if mobile != was_mobile {
            info_log!("Viewport is now {}", if mobile { "mobile" } else { "desktop" });
            for listener in self.listeners.values() {
                listener(mobile);
            }
        }
    }
}

impl ViewportClassifier for MediaQueryWatcher {
    fn subscribe(&mut self, listener: ViewportListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        listener(self.is_mobile());
        self.listeners.insert(id, listener);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.remove(&id);
    }

    fn is_mobile(&self) -> bool {
        self.width <= MOBILE_MAX_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_screen_classes() {
        assert_eq!(ScreenClass::from_width(320), ScreenClass::Xs);
        assert_eq!(ScreenClass::from_width(576), ScreenClass::Sm);
        assert_eq!(ScreenClass::from_width(767), ScreenClass::Sm);
        assert_eq!(ScreenClass::from_width(768), ScreenClass::Md);
        assert_eq!(ScreenClass::from_width(1199), ScreenClass::Lg);
        assert_eq!(ScreenClass::from_width(1920), ScreenClass::Xl);
        assert_eq!(ScreenClass::Md.css_class(), "screen-md");
        assert!(ScreenClass::Sm.is_mobile());
        assert!(!ScreenClass::Md.is_mobile());
    }

    #[test]
    fn test_listener_called_on_flip_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut watcher = MediaQueryWatcher::new(1280);

        let counter = Arc::clone(&calls);
        let id = watcher.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        watcher.resize(1000);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        watcher.resize(600);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        watcher.unsubscribe(id);
        watcher.resize(1280);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(watcher.subscriber_count(), 0);
    }
}
