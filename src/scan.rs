//! Builds the gallery's media list from a content directory.
//!
//! Two sources, first match wins:
//!
//! 1. `media.json` in the content root: an explicit array of descriptors
//!    (`{"kind": "video", "source": "...", "caption": "..."}`).
//! 2. The media files in the content root itself (not recursive):
//!
//! ```text
//! content/
//! ├── gallery.toml          # Page config (optional)
//! ├── 001-convocation.jpg   # Image, first
//! ├── 001-convocation.txt   # Caption sidecar for the file above
//! ├── 002-campus-walk.mp4   # Video
//! ├── 010-stage.png         # Gaps in numbering are fine
//! └── backstage.webp        # Unnumbered: sorted after numbered files
//! ```
//!
//! Numbered files are ordered by their `NNN-` prefix, unnumbered ones follow in
//! name order. Two files with the same number are rejected. Hidden files are
//! skipped. Items without a caption sidecar get the default `"Image {n}"`.

use crate::config::{self, PageConfig};
use crate::media::{MediaDescriptor, MediaKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const MEDIA_LIST_FILE: &str = "media.json";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error in {0}: {1}")]
    Json(PathBuf, serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Duplicate media number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    MediaList,
    Directory,
}

/// Output of a scan: the ordered media list plus the page config.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub origin: Origin,
    pub media: Vec<Entry>,
    pub config: PageConfig,
}

impl Manifest {
    pub fn descriptors(&self) -> impl Iterator<Item = MediaDescriptor> + '_ {
        self.media.iter().map(|e| e.descriptor.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(flatten)]
    pub descriptor: MediaDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Sidecar the caption was read from, relative to the content root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_file: Option<String>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let config = config::load_config(root)?;

    let list_path = root.join(MEDIA_LIST_FILE);
    let (origin, media) = if list_path.is_file() {
        (Origin::MediaList, read_media_list(&list_path)?)
    } else {
        (Origin::Directory, scan_media_files(root)?)
    };
    tracing::debug!(?origin, count = media.len(), root = %root.display(), "scanned media");

    Ok(Manifest {
        origin,
        media,
        config,
    })
}

fn read_media_list(path: &Path) -> Result<Vec<Entry>, ScanError> {
    let content = fs::read_to_string(path)?;
    let descriptors: Vec<MediaDescriptor> =
        serde_json::from_str(&content).map_err(|e| ScanError::Json(path.to_path_buf(), e))?;
    Ok(descriptors
        .into_iter()
        .map(|descriptor| Entry {
            descriptor,
            number: None,
            caption_file: None,
        })
        .collect())
}

fn scan_media_files(root: &Path) -> Result<Vec<Entry>, ScanError> {
    let mut numbered: BTreeMap<u32, Entry> = BTreeMap::new();
    let mut unnumbered = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for dir_entry in walker {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type().is_file() {
            continue;
        }
        let path = dir_entry.path();
        let file_name = dir_entry.file_name().to_string_lossy().to_string();
        if file_name.starts_with('.') {
            continue;
        }
        let Some(kind) = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaKind::from_extension)
        else {
            continue;
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let (caption, caption_file) = read_sidecar(root, &stem)?;
        let number = parse_number_prefix(&stem);
        let entry = Entry {
            descriptor: MediaDescriptor {
                kind: Some(kind),
                source: file_name,
                caption,
            },
            number,
            caption_file,
        };

        match number {
            Some(n) => {
                if numbered.insert(n, entry).is_some() {
                    return Err(ScanError::DuplicateNumber(n, root.to_path_buf()));
                }
            }
            None => unnumbered.push(entry),
        }
    }

    Ok(numbered.into_values().chain(unnumbered).collect())
}

/// Caption from `<stem>.txt`, trimmed; empty files count as absent.
fn read_sidecar(root: &Path, stem: &str) -> Result<(Option<String>, Option<String>), ScanError> {
    let name = format!("{stem}.txt");
    let path = root.join(&name);
    if !path.is_file() {
        return Ok((None, None));
    }
    let text = fs::read_to_string(&path)?.trim().to_string();
    if text.is_empty() {
        Ok((None, None))
    } else {
        Ok((Some(text), Some(name)))
    }
}

/// `"012-stage"` → `Some(12)`, `"012"` → `Some(12)`, `"stage"` → `None`.
fn parse_number_prefix(stem: &str) -> Option<u32> {
    let prefix = stem.split_once('-').map_or(stem, |(p, _)| p);
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}
