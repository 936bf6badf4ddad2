//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` (pure, no
//! I/O, easy to test) and a `print_*` wrapper that writes to stdout.
//!
//! ## Scan
//!
//! ```text
//! Media (3 items, from directory)
//! 001 Convocation 2019 [image]
//!     Source: 001-convocation.jpg
//!     Caption: 001-convocation.txt
//! 002 Image 2 [video]
//!     Source: 002-walk.mp4
//!
//! Config
//!     gallery.toml
//! ```
//!
//! ## Replay
//!
//! ```text
//! 001 open gallery        open   1 of 3  Convocation 2019
//! 002 key ArrowRight      open   2 of 3  Image 2  [default prevented]
//! 003 touch end 130       open   2 of 3  Image 2  (ignored)
//! 004 slider tick 5000ms  slide 2
//! 005 card 1 click         card 1 expanding
//! ```

use crate::cards::CardPhase;
use crate::config::CONFIG_FILE;
use crate::contact::Receipt;
use crate::media::{MediaCollection, MediaKind};
use crate::scan::{Manifest, Origin};
use crate::session::{PageEvent, Step};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let collection: MediaCollection = manifest.descriptors().collect();

    let origin = match manifest.origin {
        Origin::MediaList => "from media.json",
        Origin::Directory => "from directory",
    };
    lines.push(format!("Media ({} items, {})", collection.len(), origin));

    for (i, (item, entry)) in collection.iter().zip(&manifest.media).enumerate() {
        lines.push(format!(
            "{} {} [{}]",
            format_index(i + 1),
            truncate(item.caption(), 60),
            kind_label(item.kind())
        ));
        lines.push(format!("    Source: {}", item.source()));
        if let Some(ref sidecar) = entry.caption_file {
            lines.push(format!("    Caption: {}", sidecar));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(CONFIG_FILE).exists() {
        lines.push(format!("    {}", CONFIG_FILE));
    } else {
        lines.push("    (stock defaults)".to_string());
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

fn event_label(event: &PageEvent) -> String {
    match event {
        PageEvent::OpenGallery => "open gallery".to_string(),
        PageEvent::CloseGallery => "close gallery".to_string(),
        PageEvent::BackdropClick => "backdrop click".to_string(),
        PageEvent::Thumbnail { index } => format!("thumbnail {}", index),
        PageEvent::Prev => "prev button".to_string(),
        PageEvent::Next => "next button".to_string(),
        PageEvent::Key { key } => format!("key {}", String::from(key.clone()).escape_debug()),
        PageEvent::TouchStart { x } => format!("touch start {}", x),
        PageEvent::TouchEnd { x } => format!("touch end {}", x),
        PageEvent::MediaLoaded { ticket: None } => "media loaded".to_string(),
        PageEvent::MediaLoaded {
            ticket: Some(ticket),
        } => format!("media loaded #{}@{}", ticket.index + 1, ticket.generation),
        PageEvent::AddMedia { descriptor } => format!("add media {}", descriptor.source),
        PageEvent::SliderTick { elapsed_ms } => format!("slider tick {}ms", elapsed_ms),
        PageEvent::SliderControl { step } => format!("slider control {:+}", step),
        PageEvent::CardClick { index } => format!("card {} click", index + 1),
        PageEvent::CardClose { index } => format!("card {} close", index + 1),
        PageEvent::OverlayClick => "overlay click".to_string(),
        PageEvent::CardTick { elapsed_ms } => format!("card tick {}ms", elapsed_ms),
        PageEvent::ToggleTheme => "toggle theme".to_string(),
    }
}

/// One replay line for the event at 1-based `position`.
pub fn format_step(position: usize, step: &Step) -> String {
    let label = event_label(&step.event);
    let state = match step.event {
        PageEvent::SliderTick { .. } | PageEvent::SliderControl { .. } => {
            format!("slide {}", step.slide + 1)
        }
        PageEvent::CardClick { .. }
        | PageEvent::CardClose { .. }
        | PageEvent::OverlayClick
        | PageEvent::CardTick { .. } => card_state(step),
        PageEvent::ToggleTheme => format!("theme {}", step.theme),
        _ if step.gallery.is_open => format!(
            "open   {}  {}",
            step.counter.as_deref().unwrap_or("-"),
            truncate(step.caption.as_deref().unwrap_or("-"), 40)
        ),
        _ => "closed".to_string(),
    };

    let mut line = format!("{} {:<22} {}", format_index(position), label, state);
    if step.prevent_default {
        line.push_str("  [default prevented]");
    }
    if !step.handled {
        line.push_str("  (ignored)");
    }
    line
}

fn card_state(step: &Step) -> String {
    let phase = match step.card_phase {
        CardPhase::Collapsed => "collapsed",
        CardPhase::Expanding => "expanding",
        CardPhase::Open => "open",
        CardPhase::Closing => "closing",
    };
    match step.card {
        Some(index) => format!("card {} {}", index + 1, phase),
        None => format!("cards {}", phase),
    }
}

pub fn format_replay(steps: &[Step]) -> Vec<String> {
    let mut lines: Vec<String> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| format_step(i + 1, step))
        .collect();
    let ignored = steps.iter().filter(|s| !s.handled).count();
    lines.push(String::new());
    lines.push(format!("Replayed {} events, {} ignored", steps.len(), ignored));
    lines
}

pub fn print_replay(steps: &[Step]) {
    for line in format_replay(steps) {
        println!("{}", line);
    }
}

// ============================================================================
// Contact
// ============================================================================

pub fn format_receipt(receipt: &Receipt) -> Vec<String> {
    vec![
        receipt.message.to_string(),
        format!("    Reply to: {}", receipt.recipient),
        format!("    Subject: {}", receipt.subject),
    ]
}

pub fn print_receipt(receipt: &Receipt) {
    for line in format_receipt(receipt) {
        println!("{}", line);
    }
}
