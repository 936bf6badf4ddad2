//! Media items and the ordered collection the gallery navigates.
//!
//! A [`MediaCollection`] is built once from a list of [`MediaDescriptor`]s
//! (parsed from `media.json` or produced by [`crate::scan`]). Navigation only
//! moves a cursor over it; the one mutation allowed is [`MediaCollection::push`],
//! which appends and never disturbs existing indices.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What kind of element the viewport builds for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "m4v", "ogv"];

impl MediaKind {
    /// Classify a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// Classify a source URI or path by its extension, ignoring any query string.
    pub fn from_source(source: &str) -> Option<Self> {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn is_video(self) -> bool {
        self == Self::Video
    }
}

/// Serialized form of one gallery entry.
///
/// `kind` may be omitted when the source extension identifies it, and
/// `caption` may be omitted entirely (the item then gets `"Image {n}"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl MediaDescriptor {
    pub fn image(source: impl Into<String>, caption: Option<&str>) -> Self {
        Self {
            kind: Some(MediaKind::Image),
            source: source.into(),
            caption: caption.map(str::to_string),
        }
    }

    pub fn video(source: impl Into<String>, caption: Option<&str>) -> Self {
        Self {
            kind: Some(MediaKind::Video),
            source: source.into(),
            caption: caption.map(str::to_string),
        }
    }

    /// The explicit kind, or the one implied by the source extension.
    /// Unknown extensions fall back to [`MediaKind::Image`].
    pub fn resolved_kind(&self) -> MediaKind {
        self.kind
            .or_else(|| MediaKind::from_source(&self.source))
            .unwrap_or(MediaKind::Image)
    }
}

/// One immutable gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    kind: MediaKind,
    source: String,
    caption: String,
}

impl MediaItem {
    /// Build the item that sits at `index` (0-based) in its collection.
    pub fn from_descriptor(descriptor: MediaDescriptor, index: usize) -> Self {
        let kind = descriptor.resolved_kind();
        let caption = descriptor
            .caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| default_caption(index));
        Self {
            kind,
            source: descriptor.source,
            caption,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }
}

/// Caption used when the markup supplies none: `"Image {1-based position}"`.
pub fn default_caption(index: usize) -> String {
    format!("Image {}", index + 1)
}

/// Ordered, append-only list of media items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MediaCollection {
    items: Vec<MediaItem>,
}

impl MediaCollection {
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = MediaDescriptor>,
    {
        let items = descriptors
            .into_iter()
            .enumerate()
            .map(|(idx, d)| MediaItem::from_descriptor(d, idx))
            .collect();
        Self { items }
    }

    /// Append a new item at the end. Returns its index.
    pub fn push(&mut self, descriptor: MediaDescriptor) -> usize {
        let index = self.items.len();
        self.items.push(MediaItem::from_descriptor(descriptor, index));
        index
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }
}

impl FromIterator<MediaDescriptor> for MediaCollection {
    fn from_iter<T: IntoIterator<Item = MediaDescriptor>>(iter: T) -> Self {
        Self::from_descriptors(iter)
    }
}
