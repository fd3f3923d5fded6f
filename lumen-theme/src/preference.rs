use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callback invoked with the new "prefers dark" value.
pub type PreferenceListener = Box<dyn Fn(bool)>;

/// The operating system's light/dark preference.
///
/// Implementations deliver changes on the thread that owns the
/// [ThemeService](crate::manager::ThemeService). Sources that observe the
/// system from another thread must forward events to that thread first.
pub trait SystemPreference {
    /// Whether the system currently prefers a dark appearance.
    fn prefers_dark(&self) -> bool;

    /// Register a callback invoked whenever the preference changes.
    fn subscribe(&self, listener: PreferenceListener);
}

/// A preference that never changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPreference {
    dark: bool,
}

impl StaticPreference {
    /// A fixed light preference.
    pub fn light() -> Self {
        Self { dark: false }
    }

    /// A fixed dark preference.
    pub fn dark() -> Self {
        Self { dark: true }
    }
}

impl SystemPreference for StaticPreference {
    fn prefers_dark(&self) -> bool {
        self.dark
    }

    fn subscribe(&self, _listener: PreferenceListener) {}
}

/// A preference updated by the host.
///
/// Hosts that receive appearance events from their windowing layer forward
/// them with [ManualPreference::set_dark]. Subscribers are only notified
/// when the value actually changes.
#[derive(Default)]
pub struct ManualPreference {
    dark: Cell<bool>,
    listeners: RefCell<Vec<Rc<PreferenceListener>>>,
}

impl ManualPreference {
    /// Create a preference with the given initial value.
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Cell::new(dark),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Update the preference and notify subscribers if it changed.
    pub fn set_dark(&self, dark: bool) {
        if self.dark.replace(dark) == dark {
            return;
        }

        // Listeners may subscribe again while being notified.
        let listeners: Vec<Rc<PreferenceListener>> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(dark);
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl SystemPreference for ManualPreference {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn subscribe(&self, listener: PreferenceListener) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }
}
