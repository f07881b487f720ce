//! Navigation progress indicator control.
//!
//! The indicator starts once per distinct path and finishes as soon as the
//! global loading flag clears. [`ProgressController`] owns the `last_path`
//! guard that makes this a once-per-navigation effect; the component that
//! composes the layout shell owns the controller and hands it to
//! [`LayoutShell::navigate`](crate::LayoutShell::navigate).

/// A progress bar or spinner driven by navigation.
pub trait ProgressIndicator {
    /// Show or restart the indicator.
    fn start(&mut self);

    /// Complete and hide the indicator.
    fn done(&mut self);
}

/// Progress indicator that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndicator;

impl ProgressIndicator for NoopIndicator {
    fn start(&mut self) {}

    fn done(&mut self) {}
}

/// Drives a [`ProgressIndicator`] from navigation events.
#[derive(Debug, Default)]
pub struct ProgressController<P> {
    indicator: P,
    last_path: Option<String>,
}

impl<P: ProgressIndicator> ProgressController<P> {
    pub fn new(indicator: P) -> Self {
        Self {
            indicator,
            last_path: None,
        }
    }

    /// Record a navigation to `path` while the app is (or is not) loading.
    ///
    /// For a path different from the last settled one the indicator starts;
    /// when nothing is loading it also finishes and `path` becomes the
    /// settled path. Repeated calls for the settled path do nothing.
    pub fn track(&mut self, path: &str, loading: bool) {
        if self.last_path.as_deref() == Some(path) {
            return;
        }
        self.indicator.start();
        if !loading {
            self.indicator.done();
            self.last_path = Some(path.to_string());
        }
    }

    /// The last path whose navigation settled.
    pub fn last_path(&self) -> Option<&str> {
        self.last_path.as_deref()
    }

    /// The driven indicator.
    pub fn indicator(&self) -> &P {
        &self.indicator
    }
}
