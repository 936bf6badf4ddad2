//! Expandable event cards.
//!
//! Clicking a collapsed card expands it over a page overlay and locks body
//! scrolling (`modal-open`). The card fades in a moment later. Closing (card
//! button, overlay click or Escape) fades it out first and collapses it once
//! the fade has run.
//!
//! As with the slider, time is fed in through [`CardDeck::tick`].
//!
//! ```text
//! Collapsed --click--> Expanding --reveal delay--> Open
//!     ^                    |                        |
//!     |                  close                    close
//!     |                    v                        |
//!     +--collapse delay-- Closing <-----------------+
//! ```

use crate::config::CardsConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPhase {
    #[default]
    Collapsed,
    /// `expanded` is set, `visible` not yet.
    Expanding,
    Open,
    /// `visible` is gone, `expanded` stays until the fade-out ends.
    Closing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDeck {
    count: usize,
    expanded: Option<usize>,
    phase: CardPhase,
    remaining_ms: u64,
    reveal_delay_ms: u64,
    collapse_delay_ms: u64,
}

impl CardDeck {
    pub fn new(count: usize, config: &CardsConfig) -> Self {
        Self {
            count,
            expanded: None,
            phase: CardPhase::Collapsed,
            remaining_ms: 0,
            reveal_delay_ms: config.reveal_delay_ms,
            collapse_delay_ms: config.collapse_delay_ms,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    /// The card carrying the `expanded` class.
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn is_visible(&self) -> bool {
        self.phase == CardPhase::Open
    }

    /// Overlay `active` and body `modal-open` follow the expanded card.
    pub fn overlay_active(&self) -> bool {
        self.expanded.is_some()
    }

    pub fn body_locked(&self) -> bool {
        self.expanded.is_some()
    }

    /// Click on the body of card `index`. Only a collapsed deck reacts: while
    /// a card is expanded the overlay sits on top of the others.
    pub fn click(&mut self, index: usize) -> bool {
        if index >= self.count || self.expanded.is_some() {
            return false;
        }
        self.expanded = Some(index);
        self.phase = CardPhase::Expanding;
        self.remaining_ms = self.reveal_delay_ms;
        tracing::debug!(index, "event card expanded");
        self.settle();
        true
    }

    /// The close button inside card `index`.
    pub fn close_button(&mut self, index: usize) -> bool {
        if self.expanded != Some(index) {
            return false;
        }
        self.begin_close()
    }

    /// Overlay click or Escape: close whichever card is expanded.
    pub fn dismiss(&mut self) -> bool {
        if self.expanded.is_none() {
            return false;
        }
        self.begin_close()
    }

    /// Let `elapsed_ms` pass. Returns `true` if the phase changed.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        if !matches!(self.phase, CardPhase::Expanding | CardPhase::Closing) {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        let before = self.phase;
        self.settle();
        self.phase != before
    }

    fn begin_close(&mut self) -> bool {
        if self.phase == CardPhase::Closing {
            return false;
        }
        // A pending reveal is dropped, so the card never turns visible again
        // after it starts closing.
        self.phase = CardPhase::Closing;
        self.remaining_ms = self.collapse_delay_ms;
        tracing::debug!(index = ?self.expanded, "event card closing");
        self.settle();
        true
    }

    fn settle(&mut self) {
        if self.remaining_ms > 0 {
            return;
        }
        match self.phase {
            CardPhase::Expanding => self.phase = CardPhase::Open,
            CardPhase::Closing => {
                self.phase = CardPhase::Collapsed;
                self.expanded = None;
                tracing::debug!("event card collapsed");
            }
            CardPhase::Collapsed | CardPhase::Open => {}
        }
    }
}
