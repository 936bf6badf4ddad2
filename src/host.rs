//! The host collaborator: whatever renders the gallery.
//!
//! The controller never touches a document directly. It publishes through the
//! [`Host`] trait: mount/unmount the single viewport element, flag thumbnails,
//! and write caption/counter text into optional regions. A host without a
//! counter (or caption) region returns `None` from the matching slot and that
//! update step is skipped.
//!
//! [`HeadlessHost`] records everything a browser would show. The CLI replays
//! events against it and [`crate::render`] turns its state into HTML.

use crate::media::{MediaCollection, MediaItem, MediaKind};
use serde::{Deserialize, Serialize};

/// Identifies the transition a media element was built for.
///
/// Deferred callbacks (image load, video decode) carry the ticket back to
/// [`crate::gallery::GalleryController::media_ready`], which drops them when
/// the generation has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub generation: u64,
    pub index: usize,
}

/// The element living in the main viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaElement {
    pub ticket: Ticket,
    pub kind: MediaKind,
    /// `None` once the element has been released.
    pub source: Option<String>,
    pub alt: String,
    pub controls: bool,
    pub autoplay: bool,
    pub playing: bool,
    /// Elements start hidden and fade in once loaded/decoded.
    pub visible: bool,
}

impl MediaElement {
    pub fn build(item: &MediaItem, ticket: Ticket) -> Self {
        let is_video = item.kind().is_video();
        Self {
            ticket,
            kind: item.kind(),
            source: Some(item.source().to_string()),
            alt: item.caption().to_string(),
            controls: is_video,
            autoplay: is_video,
            playing: is_video,
            visible: false,
        }
    }

    pub fn reveal(&mut self) {
        self.visible = true;
    }

    /// Stop playback and drop the source.
    pub fn release(&mut self) {
        self.playing = false;
        self.visible = false;
        self.source = None;
    }

    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }
}

pub trait Host {
    fn set_scroll_locked(&mut self, locked: bool);

    /// Informational; fired after the gallery becomes visible.
    fn opened(&mut self) {}

    fn closed(&mut self) {}

    fn mount(&mut self, element: MediaElement);

    /// Detach the current viewport element, if any.
    fn unmount(&mut self) -> Option<MediaElement>;

    fn viewport(&self) -> Option<&MediaElement>;

    fn viewport_mut(&mut self) -> Option<&mut MediaElement>;

    /// Receives an element after the controller released it.
    fn discard(&mut self, _element: MediaElement) {}

    fn thumbnail_count(&self) -> usize;

    fn set_thumbnail_active(&mut self, index: usize, active: bool);

    fn add_thumbnail(&mut self, item: &MediaItem);

    fn caption_slot(&mut self) -> Option<&mut String>;

    fn counter_slot(&mut self) -> Option<&mut String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub kind: MediaKind,
    pub source: String,
    pub caption: String,
    pub active: bool,
}

/// In-memory host used by the CLI, the renderer and the tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    scroll_locked: bool,
    modal_visible: bool,
    viewport: Option<MediaElement>,
    thumbnails: Vec<Thumbnail>,
    caption: Option<String>,
    counter: Option<String>,
    released: Vec<MediaElement>,
    opened_count: usize,
}

impl HeadlessHost {
    /// A host with one thumbnail per item and every optional region present.
    pub fn for_collection(collection: &MediaCollection) -> Self {
        let mut host = Self {
            caption: Some(String::new()),
            counter: Some(String::new()),
            ..Self::default()
        };
        for item in collection.iter() {
            host.add_thumbnail(item);
        }
        host
    }

    pub fn without_caption(mut self) -> Self {
        self.caption = None;
        self
    }

    pub fn without_counter(mut self) -> Self {
        self.counter = None;
        self
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn active_thumbnails(&self) -> Vec<usize> {
        self.thumbnails
            .iter()
            .enumerate()
            .filter(|(_, t)| t.active)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn counter(&self) -> Option<&str> {
        self.counter.as_deref()
    }

    /// Elements torn down so far, oldest first.
    pub fn released(&self) -> &[MediaElement] {
        &self.released
    }

    pub fn opened_count(&self) -> usize {
        self.opened_count
    }
}

impl Host for HeadlessHost {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn opened(&mut self) {
        self.modal_visible = true;
        self.opened_count += 1;
    }

    fn closed(&mut self) {
        self.modal_visible = false;
    }

    fn mount(&mut self, element: MediaElement) {
        self.viewport = Some(element);
    }

    fn unmount(&mut self) -> Option<MediaElement> {
        self.viewport.take()
    }

    fn viewport(&self) -> Option<&MediaElement> {
        self.viewport.as_ref()
    }

    fn viewport_mut(&mut self) -> Option<&mut MediaElement> {
        self.viewport.as_mut()
    }

    fn discard(&mut self, element: MediaElement) {
        self.released.push(element);
    }

    fn thumbnail_count(&self) -> usize {
        self.thumbnails.len()
    }

    fn set_thumbnail_active(&mut self, index: usize, active: bool) {
        if let Some(thumb) = self.thumbnails.get_mut(index) {
            thumb.active = active;
        }
    }

    fn add_thumbnail(&mut self, item: &MediaItem) {
        self.thumbnails.push(Thumbnail {
            kind: item.kind(),
            source: item.source().to_string(),
            caption: item.caption().to_string(),
            active: false,
        });
    }

    fn caption_slot(&mut self) -> Option<&mut String> {
        self.caption.as_mut()
    }

    fn counter_slot(&mut self) -> Option<&mut String> {
        self.counter.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaDescriptor;

    #[test]
    fn video_element_autoplays_with_controls() {
        let item = MediaItem::from_descriptor(MediaDescriptor::video("c.mp4", Some("C")), 2);
        let el = MediaElement::build(
            &item,
            Ticket {
                generation: 1,
                index: 2,
            },
        );
        assert!(el.controls && el.autoplay && el.playing);
        assert!(!el.visible);
        assert_eq!(el.alt, "C");
    }

    #[test]
    fn image_element_is_static() {
        let item = MediaItem::from_descriptor(MediaDescriptor::image("a.jpg", None), 0);
        let el = MediaElement::build(
            &item,
            Ticket {
                generation: 1,
                index: 0,
            },
        );
        assert!(!el.controls && !el.autoplay && !el.playing);
        assert_eq!(el.alt, "Image 1");
    }

    #[test]
    fn release_stops_playback_and_drops_source() {
        let item = MediaItem::from_descriptor(MediaDescriptor::video("c.mp4", None), 0);
        let mut el = MediaElement::build(
            &item,
            Ticket {
                generation: 1,
                index: 0,
            },
        );
        el.reveal();
        el.release();
        assert!(el.is_released());
        assert!(!el.playing);
        assert!(!el.visible);
    }

    #[test]
    fn headless_host_builds_thumbnails_for_collection() {
        let collection = MediaCollection::from_descriptors(vec![
            MediaDescriptor::image("a.jpg", Some("A")),
            MediaDescriptor::video("b.mp4", Some("B")),
        ]);
        let host = HeadlessHost::for_collection(&collection);
        assert_eq!(host.thumbnail_count(), 2);
        assert!(host.active_thumbnails().is_empty());
        assert_eq!(host.caption(), Some(""));
        assert_eq!(host.counter(), Some(""));
        assert!(HeadlessHost::for_collection(&collection)
            .without_counter()
            .counter()
            .is_none());
    }
}
