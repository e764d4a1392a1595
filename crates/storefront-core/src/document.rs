//! Document-level styling hook.
//!
//! The theme controller only flips two markers: the `data-theme` attribute
//! and the `theme-transitioning` class. What they look like belongs to the
//! presentation layer.

use tokio::sync::watch;

/// Class applied to the root element while a theme change is fading in.
pub const TRANSITION_CLASS: &str = "theme-transitioning";

/// Receiver of the two document markers.
pub trait DocumentHook: Send + Sync {
    /// Set (or with `None`, remove) the root `data-theme` attribute
    fn set_theme_attribute(&self, value: Option<&str>);

    /// Add or remove the transition marker class
    fn set_transition_marker(&self, active: bool);
}

/// Current value of both markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMarkers {
    pub theme_attribute: Option<String>,
    pub transitioning: bool,
}

impl DocumentMarkers {
    /// Class list for the root element.
    pub fn root_class(&self, base: &str) -> String {
        if self.transitioning {
            format!("{base} {TRANSITION_CLASS}")
        } else {
            base.to_string()
        }
    }
}

/// [`DocumentHook`] that publishes markers on a watch channel for the UI
/// to render.
#[derive(Debug)]
pub struct WatchDocument {
    tx: watch::Sender<DocumentMarkers>,
}

impl Default for WatchDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchDocument {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DocumentMarkers::default());
        Self { tx }
    }

    /// Subscribe to marker changes
    pub fn subscribe(&self) -> watch::Receiver<DocumentMarkers> {
        self.tx.subscribe()
    }

    /// Current markers
    pub fn markers(&self) -> DocumentMarkers {
        self.tx.borrow().clone()
    }
}

impl DocumentHook for WatchDocument {
    fn set_theme_attribute(&self, value: Option<&str>) {
        self.tx.send_if_modified(|markers| {
            let next = value.map(str::to_string);
            if markers.theme_attribute == next {
                return false;
            }
            markers.theme_attribute = next;
            true
        });
    }

    fn set_transition_marker(&self, active: bool) {
        self.tx.send_if_modified(|markers| {
            let changed = markers.transitioning != active;
            markers.transitioning = active;
            changed
        });
    }
}
