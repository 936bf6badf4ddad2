//! The gallery controller: sole owner of the cursor and open/closed state.
//!
//! Every input source ends up calling one of [`GalleryController::open`],
//! [`close`](GalleryController::close), [`show_at`](GalleryController::show_at),
//! [`next`](GalleryController::next) or [`previous`](GalleryController::previous).
//! Each call runs to completion and leaves the host consistent with
//! `current_index`: one live viewport element, one active thumbnail, caption
//! and `"{i+1} of {N}"` counter.
//!
//! ## Failure model
//!
//! Nothing here fails. An empty collection turns `open` and navigation into
//! no-ops, an out-of-range index leaves state untouched, and a missing caption
//! or counter region only skips that one write.
//!
//! ## Deferred effects
//!
//! Every mounted element carries a [`Ticket`]. The host hands it back through
//! [`GalleryController::media_ready`] when the image has loaded or the video
//! has decoded. `show_at` and `close` advance the generation, so a callback
//! for an element that has since been replaced is ignored.

use crate::host::{Host, MediaElement, Ticket};
use crate::media::{MediaCollection, MediaDescriptor, MediaItem};
use serde::Serialize;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GalleryState {
    pub is_open: bool,
    pub current_index: usize,
    pub last_rendered_index: Option<usize>,
}

pub struct GalleryController<H: Host> {
    collection: MediaCollection,
    state: GalleryState,
    generation: u64,
    host: H,
}

impl<H: Host> GalleryController<H> {
    pub fn new(collection: MediaCollection, host: H) -> Self {
        Self {
            collection,
            state: GalleryState::default(),
            generation: 0,
            host,
        }
    }

    pub fn state(&self) -> GalleryState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn collection(&self) -> &MediaCollection {
        &self.collection
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.collection.get(self.state.current_index)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Ticket of the element currently mounted, if any.
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.host.viewport().map(|el| el.ticket)
    }

    /// Open at the first item.
    pub fn open(&mut self) {
        self.open_at(0);
    }

    /// Open and mount `index` directly, without building the first item on
    /// the way. Ignored for an empty collection or an out-of-range index.
    pub fn open_at(&mut self, index: usize) {
        if index >= self.collection.len() {
            debug!(
                index,
                len = self.collection.len(),
                "open ignored: no such item"
            );
            return;
        }
        self.state.is_open = true;
        self.host.set_scroll_locked(true);
        self.host.opened();
        info!(items = self.collection.len(), index, "gallery opened");
        self.show_at(index as isize);
    }

    pub fn close(&mut self) {
        if !self.state.is_open {
            return;
        }
        self.state.is_open = false;
        self.generation += 1;
        self.teardown();
        self.host.set_scroll_locked(false);
        self.host.closed();
        info!(index = self.state.current_index, "gallery closed");
    }

    /// Move the cursor to `index` and resynchronize the host.
    ///
    /// Takes a signed index so callers can pass raw computations; anything
    /// outside `[0, N-1]` is ignored.
    pub fn show_at(&mut self, index: isize) {
        let Some(index) = usize::try_from(index)
            .ok()
            .filter(|&i| i < self.collection.len())
        else {
            debug!(index, len = self.collection.len(), "show_at out of range");
            return;
        };

        self.state.current_index = index;
        self.generation += 1;
        self.teardown();

        if self.state.is_open {
            let Some(item) = self.collection.get(index) else {
                return;
            };
            let ticket = Ticket {
                generation: self.generation,
                index,
            };
            self.host.mount(MediaElement::build(item, ticket));
            self.state.last_rendered_index = Some(index);
        }

        self.sync_thumbnails();
        self.sync_text();
        debug!(
            index,
            len = self.collection.len(),
            open = self.state.is_open,
            "transition"
        );
    }

    pub fn next(&mut self) {
        let len = self.collection.len();
        if len == 0 {
            return;
        }
        let target = (self.state.current_index + 1) % len;
        self.show_at(target as isize);
    }

    pub fn previous(&mut self) {
        let len = self.collection.len();
        if len == 0 {
            return;
        }
        let target = (self.state.current_index + len - 1) % len;
        self.show_at(target as isize);
    }

    /// Apply the fade-in for a loaded/decoded element.
    ///
    /// Returns `false` when the ticket is stale: the gallery was closed or
    /// navigated away from since the element was built.
    pub fn media_ready(&mut self, ticket: Ticket) -> bool {
        if !self.state.is_open || ticket.generation != self.generation {
            trace!(?ticket, current = self.generation, "stale media callback");
            return false;
        }
        match self.host.viewport_mut() {
            Some(el) if el.ticket == ticket => {
                el.reveal();
                true
            }
            _ => false,
        }
    }

    /// Append an item without disturbing existing indices or the selection.
    pub fn append(&mut self, descriptor: MediaDescriptor) -> usize {
        let index = self.collection.push(descriptor);
        if let Some(item) = self.collection.get(index) {
            self.host.add_thumbnail(item);
        }
        self.sync_text();
        debug!(index, "media appended");
        index
    }

    fn teardown(&mut self) {
        if let Some(mut old) = self.host.unmount() {
            old.release();
            trace!(index = old.ticket.index, "released viewport element");
            self.host.discard(old);
        }
    }

    fn sync_thumbnails(&mut self) {
        let current = self.state.current_index;
        for i in 0..self.host.thumbnail_count() {
            self.host.set_thumbnail_active(i, i == current);
        }
    }

    fn sync_text(&mut self) {
        let index = self.state.current_index;
        let len = self.collection.len();
        let Some(item) = self.collection.get(index) else {
            return;
        };
        match self.host.caption_slot() {
            Some(slot) => {
                slot.clear();
                slot.push_str(item.caption());
            }
            None => trace!("caption region absent"),
        }
        match self.host.counter_slot() {
            Some(slot) => *slot = format_counter(index, len),
            None => trace!("counter region absent"),
        }
    }
}

/// `"{index+1} of {len}"`.
pub fn format_counter(index: usize, len: usize) -> String {
    format!("{} of {}", index + 1, len)
}
