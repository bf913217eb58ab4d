use crate::settings::WindowSettings;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

pub const MIN_OPACITY: f32 = 0.5;
pub const MAX_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub opacity: f32,
    pub position_x: i32,
    pub position_y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::from(&WindowSettings::default())
    }
}

impl From<&WindowSettings> for OverlayConfig {
    fn from(w: &WindowSettings) -> Self {
        Self {
            enabled: w.enabled,
            opacity: w.opacity.clamp(MIN_OPACITY, MAX_OPACITY),
            position_x: w.x_position,
            position_y: w.y_position,
            width: w.width,
            height: w.height,
        }
    }
}

/// Visibility and geometry state of the companion window.
///
/// The visible flag is shared so hotkey actions running on another thread can
/// flip it; whatever draws the window reads it through
/// [`Overlay::visibility_handle`].
#[derive(Debug, Clone)]
pub struct Overlay {
    config: Arc<Mutex<OverlayConfig>>,
    visible: Arc<AtomicBool>,
}

impl Overlay {
    pub fn new(config: OverlayConfig) -> Self {
        let visible = config.enabled;
        Self {
            config: Arc::new(Mutex::new(config)),
            visible: Arc::new(AtomicBool::new(visible)),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Returns `false` when the overlay is disabled in the configuration.
    pub fn show(&self) -> bool {
        if !self.config().enabled {
            tracing::debug!("overlay disabled; ignoring show request");
            return false;
        }
        self.set_visible(true);
        true
    }

    pub fn hide(&self) -> bool {
        self.set_visible(false);
        true
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&self) -> bool {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
        self.is_visible()
    }

    pub fn set_opacity(&self, value: f32) -> f32 {
        let clamped = value.clamp(MIN_OPACITY, MAX_OPACITY);
        match self.config.lock() {
            Ok(mut cfg) => cfg.opacity = clamped,
            Err(poisoned) => poisoned.into_inner().opacity = clamped,
        }
        clamped
    }

    pub fn config(&self) -> OverlayConfig {
        match self.config.lock() {
            Ok(cfg) => cfg.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn visibility_handle(&self) -> Arc<AtomicBool> {
        self.visible.clone()
    }

    fn set_visible(&self, next: bool) {
        let old = self.visible.swap(next, Ordering::SeqCst);
        if old != next {
            tracing::debug!(from = ?old, to = ?next, "visibility updated");
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
