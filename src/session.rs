//! A whole page wired together: gallery, adapters, hero slider, event cards
//! and theme.
//!
//! [`PageSession::apply`] routes one [`PageEvent`] to the component that owns
//! it. Event scripts are JSON arrays of tagged events:
//!
//! ```json
//! [
//!   {"type": "open_gallery"},
//!   {"type": "key", "key": "ArrowRight"},
//!   {"type": "touch_start", "x": 120.0},
//!   {"type": "touch_end", "x": 40.0},
//!   {"type": "media_loaded"},
//!   {"type": "close_gallery"}
//! ]
//! ```
//!
//! `media_loaded` completes the element mounted right now. A script can also
//! name the ticket of an earlier element to play back a late completion:
//! `{"type": "media_loaded", "ticket": {"generation": 1, "index": 0}}`.

use crate::cards::{CardDeck, CardPhase};
use crate::config::PageConfig;
use crate::gallery::{GalleryController, GalleryState};
use crate::host::{HeadlessHost, Ticket};
use crate::input::{
    Button, ButtonAdapter, Key, KeyOutcome, KeyboardAdapter, SwipeAdapter, ThumbnailAdapter,
};
use crate::media::{MediaCollection, MediaDescriptor};
use crate::slider::Slider;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("Invalid event script {0}: {1}")]
    Json(PathBuf, serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    OpenGallery,
    CloseGallery,
    BackdropClick,
    Thumbnail { index: usize },
    Prev,
    Next,
    Key { key: Key },
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
    /// The viewport element finished loading (image) or decoding (video).
    /// Without a ticket, the element mounted right now.
    MediaLoaded {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ticket: Option<Ticket>,
    },
    AddMedia { descriptor: MediaDescriptor },
    SliderTick { elapsed_ms: u64 },
    SliderControl { step: i64 },
    CardClick { index: usize },
    CardClose { index: usize },
    OverlayClick,
    CardTick { elapsed_ms: u64 },
    ToggleTheme,
}

/// Load an event script from a JSON file.
pub fn load_script(path: &Path) -> Result<Vec<PageEvent>, SessionError> {
    let content =
        fs::read_to_string(path).map_err(|e| SessionError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| SessionError::Json(path.to_path_buf(), e))
}

/// What a single event did, for replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub event: PageEvent,
    /// `false` when the event was ignored (closed gallery, short swipe, stale load...).
    pub handled: bool,
    /// For key events: whether the host's default action must be suppressed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub prevent_default: bool,
    pub gallery: GalleryState,
    pub caption: Option<String>,
    pub counter: Option<String>,
    pub slide: usize,
    pub card: Option<usize>,
    pub card_phase: CardPhase,
    pub theme: Theme,
}

pub struct PageSession {
    gallery: GalleryController<HeadlessHost>,
    thumbnails: ThumbnailAdapter,
    buttons: ButtonAdapter,
    keyboard: KeyboardAdapter,
    swipe: SwipeAdapter,
    slider: Slider,
    cards: CardDeck,
    theme: Theme,
}

impl PageSession {
    pub fn new(
        collection: MediaCollection,
        config: &PageConfig,
        slide_count: usize,
        theme: Theme,
    ) -> Self {
        let host = HeadlessHost::for_collection(&collection);
        Self {
            gallery: GalleryController::new(collection, host),
            thumbnails: ThumbnailAdapter::new(config.gallery.thumbnail_click),
            buttons: ButtonAdapter,
            keyboard: KeyboardAdapter,
            swipe: SwipeAdapter::from_config(&config.gallery),
            slider: Slider::new(slide_count, config.slider.interval_ms),
            cards: CardDeck::new(0, &config.cards),
            theme,
        }
    }

    /// Give the page `count` event cards.
    pub fn with_cards(mut self, count: usize, config: &PageConfig) -> Self {
        self.cards = CardDeck::new(count, &config.cards);
        self
    }

    pub fn gallery(&self) -> &GalleryController<HeadlessHost> {
        &self.gallery
    }

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn cards(&self) -> &CardDeck {
        &self.cards
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Body scrolling is locked by the open gallery or an expanded card.
    pub fn scroll_locked(&self) -> bool {
        self.gallery.host().scroll_locked() || self.cards.body_locked()
    }

    pub fn apply(&mut self, event: PageEvent) -> Step {
        let before = self.fingerprint();
        let mut prevent_default = false;

        let handled = match &event {
            PageEvent::OpenGallery => {
                self.gallery.open();
                self.gallery.is_open()
            }
            PageEvent::CloseGallery | PageEvent::BackdropClick => {
                let was_open = self.gallery.is_open();
                self.gallery.close();
                was_open
            }
            PageEvent::Thumbnail { index } => self.thumbnails.activate(&mut self.gallery, *index),
            PageEvent::Prev => {
                self.buttons.press(&mut self.gallery, Button::Prev);
                self.fingerprint() != before
            }
            PageEvent::Next => {
                self.buttons.press(&mut self.gallery, Button::Next);
                self.fingerprint() != before
            }
            PageEvent::Key { key } => {
                let outcome = self.keyboard.key_down(&mut self.gallery, key);
                prevent_default = outcome == KeyOutcome::Handled;
                let dismissed = *key == Key::Escape && self.cards.dismiss();
                prevent_default || dismissed
            }
            PageEvent::TouchStart { x } => {
                self.swipe.touch_start(*x);
                true
            }
            PageEvent::TouchEnd { x } => self.swipe.touch_end(&mut self.gallery, *x).is_some(),
            PageEvent::MediaLoaded { ticket } => {
                match ticket.or_else(|| self.gallery.pending_ticket()) {
                    Some(ticket) => self.gallery.media_ready(ticket),
                    None => false,
                }
            }
            PageEvent::AddMedia { descriptor } => {
                self.gallery.append(descriptor.clone());
                true
            }
            PageEvent::SliderTick { elapsed_ms } => self.slider.tick(*elapsed_ms) > 0,
            PageEvent::SliderControl { step } => {
                self.slider.control(*step);
                self.slider.count() > 0
            }
            PageEvent::CardClick { index } => self.cards.click(*index),
            PageEvent::CardClose { index } => self.cards.close_button(*index),
            PageEvent::OverlayClick => self.cards.dismiss(),
            PageEvent::CardTick { elapsed_ms } => self.cards.tick(*elapsed_ms),
            PageEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                true
            }
        };

        let host = self.gallery.host();
        Step {
            event,
            handled,
            prevent_default,
            gallery: self.gallery.state(),
            caption: host.caption().map(str::to_string),
            counter: host.counter().map(str::to_string),
            slide: self.slider.current(),
            card: self.cards.expanded(),
            card_phase: self.cards.phase(),
            theme: self.theme,
        }
    }

    pub fn run<I>(&mut self, events: I) -> Vec<Step>
    where
        I: IntoIterator<Item = PageEvent>,
    {
        events.into_iter().map(|e| self.apply(e)).collect()
    }

    fn fingerprint(&self) -> (GalleryState, usize) {
        (self.gallery.state(), self.gallery.host().released().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThumbnailPolicy;
    use crate::host::Host;
    use crate::test_helpers::*;

    fn session() -> PageSession {
        PageSession::new(abc_collection(), &PageConfig::default(), 3, Theme::Light)
    }

    #[test]
    fn script_parses_from_json() {
        let json = r#"[
            {"type": "open_gallery"},
            {"type": "thumbnail", "index": 2},
            {"type": "key", "key": " "},
            {"type": "touch_start", "x": 10},
            {"type": "touch_end", "x": 80.5},
            {"type": "add_media", "descriptor": {"source": "d.webm"}},
            {"type": "slider_control", "step": -1},
            {"type": "toggle_theme"}
        ]"#;
        let events: Vec<PageEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 8);
        assert_eq!(events[1], PageEvent::Thumbnail { index: 2 });
        assert_eq!(events[2], PageEvent::Key { key: Key::Space });
    }

    #[test]
    fn replay_scenario() {
        let mut s = session();
        let steps = s.run(vec![
            PageEvent::OpenGallery,
            PageEvent::Next,
            PageEvent::Next,
            PageEvent::Next,
            PageEvent::Prev,
        ]);
        let counters: Vec<_> = steps.iter().map(|s| s.counter.clone().unwrap()).collect();
        assert_eq!(counters, vec!["1 of 3", "2 of 3", "3 of 3", "1 of 3", "3 of 3"]);
        assert!(steps.iter().all(|s| s.handled));
    }

    #[test]
    fn key_events_report_prevent_default() {
        let mut s = session();
        let closed = s.apply(PageEvent::Key { key: Key::ArrowRight });
        assert!(!closed.handled && !closed.prevent_default);
        s.apply(PageEvent::OpenGallery);
        let step = s.apply(PageEvent::Key { key: Key::ArrowRight });
        assert!(step.handled && step.prevent_default);
        assert_eq!(step.gallery.current_index, 1);
    }

    #[test]
    fn media_loaded_reveals_current_element() {
        let mut s = session();
        assert!(!s.apply(PageEvent::MediaLoaded { ticket: None }).handled);
        s.apply(PageEvent::OpenGallery);
        assert!(s.apply(PageEvent::MediaLoaded { ticket: None }).handled);
        assert!(s.gallery().host().viewport().unwrap().visible);
        s.apply(PageEvent::Next);
        assert!(!s.gallery().host().viewport().unwrap().visible);
    }

    #[test]
    fn late_completion_for_replaced_element_is_ignored() {
        let mut s = session();
        s.apply(PageEvent::OpenGallery);
        let first = s.gallery().pending_ticket().unwrap();
        s.apply(PageEvent::Next);
        let step = s.apply(PageEvent::MediaLoaded {
            ticket: Some(first),
        });
        assert!(!step.handled);
        assert!(!s.gallery().host().viewport().unwrap().visible);

        let json = format!(
            r#"{{"type": "media_loaded", "ticket": {{"generation": {}, "index": 1}}}}"#,
            first.generation + 1
        );
        let current: PageEvent = serde_json::from_str(&json).unwrap();
        assert!(s.apply(current).handled);
        assert!(s.gallery().host().viewport().unwrap().visible);
    }

    #[test]
    fn media_loaded_without_ticket_parses() {
        let event: PageEvent = serde_json::from_str(r#"{"type": "media_loaded"}"#).unwrap();
        assert_eq!(event, PageEvent::MediaLoaded { ticket: None });
    }

    #[test]
    fn event_cards_lock_scroll_until_collapsed() {
        let config = PageConfig::default();
        let mut s = PageSession::new(abc_collection(), &config, 0, Theme::Light)
            .with_cards(2, &config);
        let step = s.apply(PageEvent::CardClick { index: 1 });
        assert!(step.handled);
        assert_eq!(step.card, Some(1));
        assert_eq!(step.card_phase, CardPhase::Expanding);
        assert!(s.scroll_locked());

        let step = s.apply(PageEvent::CardTick { elapsed_ms: 10 });
        assert_eq!(step.card_phase, CardPhase::Open);

        let step = s.apply(PageEvent::OverlayClick);
        assert!(step.handled);
        assert_eq!(step.card_phase, CardPhase::Closing);
        assert!(s.scroll_locked());

        s.apply(PageEvent::CardTick { elapsed_ms: 400 });
        assert!(!s.scroll_locked());
        assert_eq!(s.cards().expanded(), None);
    }

    #[test]
    fn escape_closes_expanded_card() {
        let config = PageConfig::default();
        let mut s = PageSession::new(abc_collection(), &config, 0, Theme::Light)
            .with_cards(3, &config);
        assert!(!s.apply(PageEvent::Key { key: Key::Escape }).handled);
        s.apply(PageEvent::CardClick { index: 0 });
        let step = s.apply(PageEvent::Key { key: Key::Escape });
        assert!(step.handled);
        // The gallery is closed, so the key's default action is left alone.
        assert!(!step.prevent_default);
        assert_eq!(step.card_phase, CardPhase::Closing);
        assert!(!s.apply(PageEvent::CardClose { index: 0 }).handled);
    }

    #[test]
    fn backdrop_click_closes() {
        let mut s = session();
        s.apply(PageEvent::OpenGallery);
        let step = s.apply(PageEvent::BackdropClick);
        assert!(step.handled);
        assert!(!step.gallery.is_open);
        assert!(!s.apply(PageEvent::BackdropClick).handled);
    }

    #[test]
    fn swipe_through_session() {
        let mut s = session();
        s.apply(PageEvent::OpenGallery);
        s.apply(PageEvent::TouchStart { x: 100.0 });
        let step = s.apply(PageEvent::TouchEnd { x: 160.0 });
        assert!(step.handled);
        assert_eq!(step.gallery.current_index, 2);
        s.apply(PageEvent::TouchStart { x: 100.0 });
        assert!(!s.apply(PageEvent::TouchEnd { x: 130.0 }).handled);
    }

    #[test]
    fn thumbnail_policy_from_config() {
        let mut config = PageConfig::default();
        config.gallery.thumbnail_click = ThumbnailPolicy::Open;
        let mut s = PageSession::new(abc_collection(), &config, 0, Theme::Light);
        let step = s.apply(PageEvent::Thumbnail { index: 1 });
        assert!(step.handled && step.gallery.is_open);
        assert_eq!(step.caption.as_deref(), Some("B"));
    }

    #[test]
    fn slider_and_theme_are_independent_of_gallery() {
        let mut s = session();
        let step = s.apply(PageEvent::SliderTick { elapsed_ms: 5000 });
        assert!(step.handled);
        assert_eq!(step.slide, 1);
        let step = s.apply(PageEvent::SliderControl { step: -2 });
        assert_eq!(step.slide, 2);
        let step = s.apply(PageEvent::ToggleTheme);
        assert_eq!(step.theme, Theme::Dark);
        assert!(!step.gallery.is_open);
    }

    #[test]
    fn add_media_extends_counter() {
        let mut s = session();
        s.apply(PageEvent::OpenGallery);
        let step = s.apply(PageEvent::AddMedia {
            descriptor: MediaDescriptor::video("d.mp4", Some("D")),
        });
        assert_eq!(step.counter.as_deref(), Some("1 of 4"));
    }

    #[test]
    fn load_script_reports_bad_json() {
        let tmp = content_dir(&[("events.json", "[{\"type\": \"warp\"}]")]);
        assert!(matches!(
            load_script(&tmp.path().join("events.json")),
            Err(SessionError::Json(_, _))
        ));
    }
}
