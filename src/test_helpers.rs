//! Shared test utilities.
//!
//! Fixture builders for content directories and the canonical three-item
//! gallery (image A, image B, video C), plus a view assertion that checks the
//! controller state and everything the host shows in one go.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut g = abc_gallery();
//! g.open();
//! assert_view(&g, 0, "1 of 3", "A");
//! ```

use tempfile::TempDir;

use crate::gallery::GalleryController;
use crate::host::{HeadlessHost, Host};
use crate::media::{MediaCollection, MediaDescriptor};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp content directory holding `(relative path, contents)` files.
pub fn content_dir(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, contents) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
    }
    tmp
}

pub fn abc_collection() -> MediaCollection {
    MediaCollection::from_descriptors(vec![
        MediaDescriptor::image("a.jpg", Some("A")),
        MediaDescriptor::image("b.jpg", Some("B")),
        MediaDescriptor::video("c.mp4", Some("C")),
    ])
}

pub fn abc_gallery() -> GalleryController<HeadlessHost> {
    let collection = abc_collection();
    let host = HeadlessHost::for_collection(&collection);
    GalleryController::new(collection, host)
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert cursor, active thumbnail, caption, counter and viewport all agree.
pub fn assert_view(
    gallery: &GalleryController<HeadlessHost>,
    index: usize,
    counter: &str,
    caption: &str,
) {
    assert_eq!(gallery.current_index(), index, "current index");
    let host = gallery.host();
    assert_eq!(host.active_thumbnails(), vec![index], "active thumbnails");
    assert_eq!(host.caption(), Some(caption), "caption");
    assert_eq!(host.counter(), Some(counter), "counter");
    if gallery.is_open() {
        let element = host
            .viewport()
            .unwrap_or_else(|| panic!("no element mounted for index {index}"));
        assert_eq!(element.ticket.index, index, "mounted element index");
        let expected = gallery.collection().get(index).unwrap();
        assert_eq!(element.kind, expected.kind(), "mounted element kind");
        assert_eq!(element.source.as_deref(), Some(expected.source()));
    }
}

/// Sources of a scanned manifest, in order.
pub fn sources(manifest: &crate::scan::Manifest) -> Vec<&str> {
    manifest
        .media
        .iter()
        .map(|e| e.descriptor.source.as_str())
        .collect()
}
