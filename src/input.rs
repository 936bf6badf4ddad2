//! Input adapters.
//!
//! Each adapter turns one kind of raw event into a single controller call.
//! The controller is passed in by `&mut` on every event; adapters only keep
//! what they need to recognize their gesture (the swipe start point).

use crate::config::{GalleryConfig, ThumbnailPolicy};
use crate::gallery::GalleryController;
use crate::host::Host;
use serde::{Deserialize, Serialize};

/// Keyboard keys as reported by the host (`KeyboardEvent.key` names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Space,
    Other(String),
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Escape" | "Esc" => Self::Escape,
            " " | "Space" | "Spacebar" => Self::Space,
            _ => Self::Other(name),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Space => " ".to_string(),
            Key::Other(name) => name,
        }
    }
}

/// Whether the host should run its default action for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    /// The key was consumed; suppress the browser's default (scrolling).
    Handled,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbnailAdapter {
    policy: ThumbnailPolicy,
}

impl ThumbnailAdapter {
    pub fn new(policy: ThumbnailPolicy) -> Self {
        Self { policy }
    }

    /// Returns `true` when the click reached the controller.
    pub fn activate<H: Host>(&self, gallery: &mut GalleryController<H>, index: usize) -> bool {
        if index >= gallery.collection().len() {
            tracing::debug!(index, "thumbnail click out of range");
            return false;
        }
        if !gallery.is_open() {
            return match self.policy {
                ThumbnailPolicy::Ignore => {
                    tracing::debug!(index, "thumbnail click ignored while closed");
                    false
                }
                ThumbnailPolicy::Open => {
                    gallery.open_at(index);
                    true
                }
            };
        }
        let Ok(index) = isize::try_from(index) else {
            return false;
        };
        gallery.show_at(index);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonAdapter;

impl ButtonAdapter {
    pub fn press<H: Host>(&self, gallery: &mut GalleryController<H>, button: Button) {
        match button {
            Button::Prev => gallery.previous(),
            Button::Next => gallery.next(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardAdapter;

impl KeyboardAdapter {
    pub fn key_down<H: Host>(&self, gallery: &mut GalleryController<H>, key: &Key) -> KeyOutcome {
        if !gallery.is_open() {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::ArrowLeft => gallery.previous(),
            Key::ArrowRight | Key::Space => gallery.next(),
            Key::Escape => gallery.close(),
            Key::Other(_) => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swipe {
    Previous,
    Next,
}

/// Horizontal swipe recognizer over the main viewport.
#[derive(Debug, Clone)]
pub struct SwipeAdapter {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeAdapter {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(config.swipe_threshold)
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Classify the gesture and forward it. A touch-end with no matching
    /// touch-start is dropped.
    pub fn touch_end<H: Host>(&mut self, gallery: &mut GalleryController<H>, x: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let swipe = classify_swipe(x - start, self.threshold)?;
        match swipe {
            Swipe::Previous => gallery.previous(),
            Swipe::Next => gallery.next(),
        }
        Some(swipe)
    }
}

impl Default for SwipeAdapter {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

/// Dragging right (positive delta) reveals the previous item.
pub fn classify_swipe(delta: f64, threshold: f64) -> Option<Swipe> {
    if delta.abs() <= threshold {
        None
    } else if delta > 0.0 {
        Some(Swipe::Previous)
    } else {
        Some(Swipe::Next)
    }
}
