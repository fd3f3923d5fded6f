// SPDX-License-Identifier: LGPL-3.0-only
//! System light/dark preference from the XDG Desktop Portal.
//!
//! With the `xdg-portal` feature, [PortalPreference::connect] uses the
//! [ashpd] crate to watch the desktop color scheme on a tokio runtime.
//! Changes travel over a channel and are delivered to subscribers when the
//! host calls [PortalPreference::pump] on its UI thread.

use lumen_theme::preference::{ManualPreference, PreferenceListener, SystemPreference};
use std::sync::mpsc;

#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
use ashpd::desktop::settings::{ColorScheme, Settings};
#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
use futures_lite::stream::StreamExt;
#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
use tokio::runtime::Handle;

/// A [SystemPreference] fed through a channel.
pub struct PortalPreference {
    receiver: mpsc::Receiver<bool>,
    current: ManualPreference,
}

impl PortalPreference {
    /// Create a preference and the sender that feeds it.
    ///
    /// The preference starts out light until the first value is pumped.
    pub fn channel() -> (mpsc::Sender<bool>, Self) {
        let (sender, receiver) = mpsc::channel();
        let preference = Self {
            receiver,
            current: ManualPreference::new(false),
        };
        (sender, preference)
    }

    /// Deliver every queued change to subscribers.
    ///
    /// Returns the number of values received. Subscribers only hear about
    /// values that differ from the current one.
    pub fn pump(&self) -> usize {
        let mut received = 0;
        while let Ok(dark) = self.receiver.try_recv() {
            self.current.set_dark(dark);
            received += 1;
        }
        received
    }
}

#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
impl PortalPreference {
    /// Watch the desktop color scheme.
    ///
    /// Spawns a monitoring task on the current tokio runtime. Without a
    /// runtime, or when the portal is unavailable, the preference stays light.
    pub fn connect() -> Self {
        let (sender, preference) = Self::channel();

        let Ok(handle) = Handle::try_current() else {
            log::warn!("XDG Desktop Portal: No tokio runtime available. Portal monitoring disabled.");
            return preference;
        };

        handle.spawn(async move {
            let settings = match Settings::new().await {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("Failed to initialize XDG Desktop Portal settings: {}", e);
                    return;
                },
            };

            if let Ok(initial) = settings.color_scheme().await {
                let _ = sender.send(scheme_is_dark(initial));
            }

            let mut changed = match settings.receive_color_scheme_changed().await {
                Ok(stream) => stream,
                Err(e) => {
                    log::warn!("Failed to monitor color scheme changes: {}", e);
                    return;
                },
            };

            while let Some(scheme) = changed.next().await {
                if sender.send(scheme_is_dark(scheme)).is_err() {
                    // The preference was dropped.
                    break;
                }
            }
        });

        preference
    }
}

#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
fn scheme_is_dark(scheme: ColorScheme) -> bool {
    match scheme {
        ColorScheme::PreferDark => true,
        ColorScheme::PreferLight | ColorScheme::NoPreference => false,
    }
}

impl SystemPreference for PortalPreference {
    fn prefers_dark(&self) -> bool {
        self.current.prefers_dark()
    }

    fn subscribe(&self, listener: PreferenceListener) {
        self.current.subscribe(listener);
    }
}
