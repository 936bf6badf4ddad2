//! # Alumni Gallery
//!
//! The interaction core of an alumni site: a modal photo/video gallery, the
//! hero slider, the expandable event cards, the light/dark theme preference
//! and the contact form.
//!
//! # Architecture: One Controller, Four Inputs
//!
//! ```text
//! thumbnail click ─┐
//! prev/next button ─┤                      ┌─ viewport element
//! keyboard ─────────┼─→ GalleryController ─┼─ active thumbnail
//! touch swipe ──────┘    (cursor, open)    ├─ caption
//!                                          └─ "i of N" counter
//! ```
//!
//! The [`gallery::GalleryController`] is the only thing that mutates gallery
//! state. Input adapters in [`input`] translate raw events into exactly one
//! controller call each; the controller publishes the result through the
//! [`host::Host`] trait. Nothing in the gallery path can fail: empty
//! collections and out-of-range indices are no-ops.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`media`] | `MediaItem`, `MediaCollection`, descriptors and default captions |
//! | [`gallery`] | The controller: open/close/show_at/next/previous, generation tickets |
//! | [`host`] | `Host` trait, viewport `MediaElement`, and the recording `HeadlessHost` |
//! | [`input`] | Thumbnail, button, keyboard and swipe adapters |
//! | [`scan`] | Builds the media list from `media.json` or the content directory |
//! | [`session`] | Routes scripted page events to the gallery, slider and theme |
//! | [`render`] | Maud rendering of the gallery modal |
//! | [`slider`] | Autoplaying hero carousel |
//! | [`cards`] | Expandable event cards with overlay and scroll lock |
//! | [`theme`] | Light/dark preference persisted as one JSON key |
//! | [`contact`] | Contact form validation and simulated submission |
//! | [`config`] | `gallery.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Tickets Instead of Callbacks
//!
//! Image loads and video decodes finish later than the transition that started
//! them. Each mounted element carries a [`host::Ticket`]; the host reports
//! completion with it, and the controller applies the fade-in only if no newer
//! transition (or a close) has happened since.
//!
//! ## Release on Teardown
//!
//! Replacing or closing the viewport element stops playback and drops the
//! source synchronously, so a video never keeps playing behind a closed modal
//! and two videos never play at once.
//!
//! ## Navigation While Closed
//!
//! The cursor can move while the gallery is closed (caption, counter and
//! thumbnail follow), but nothing is mounted until the gallery opens. `open`
//! always starts at the first item.

pub mod cards;
pub mod config;
pub mod contact;
pub mod gallery;
pub mod host;
pub mod input;
pub mod media;
pub mod output;
pub mod render;
pub mod scan;
pub mod session;
pub mod slider;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
