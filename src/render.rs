//! HTML rendering of the gallery modal.
//!
//! Turns a [`HeadlessHost`] into the markup a browser would be showing at that
//! moment, using [maud](https://maud.lambda.xyz/) so all captions and sources
//! are escaped.

use crate::host::{HeadlessHost, Host, MediaElement};
use crate::media::MediaKind;
use crate::theme::Theme;
use maud::{DOCTYPE, Markup, html};

/// The `#galleryModal` fragment: viewport, caption, counter, controls, thumbnails.
pub fn render_gallery(host: &HeadlessHost) -> Markup {
    let modal_class = if host.modal_visible() {
        "gallery-modal active"
    } else {
        "gallery-modal"
    };
    let display = if host.modal_visible() {
        "display: block"
    } else {
        "display: none"
    };

    html! {
        div id="galleryModal" class=(modal_class) style=(display) {
            div.gallery-content {
                button.gallery-close-button type="button" aria-label="Close gallery" { "×" }
                div id="mainMediaDisplay" {
                    @if let Some(element) = host.viewport() {
                        (render_element(element))
                    }
                }
                div.media-info {
                    @if let Some(caption) = host.caption() {
                        p id="mediaCaption" { (caption) }
                    }
                    @if let Some(counter) = host.counter() {
                        span id="mediaCounter" { (counter) }
                    }
                }
                button id="prevMedia" type="button" aria-label="Previous" { "‹" }
                button id="nextMedia" type="button" aria-label="Next" { "›" }
                div.gallery-thumbnails {
                    @for thumb in host.thumbnails() {
                        div.thumbnail.active[thumb.active]
                            data-type=(kind_name(thumb.kind))
                            data-src=(thumb.source)
                            data-caption=(thumb.caption) {
                            @if thumb.kind == MediaKind::Video {
                                div.play-icon { "▶" }
                            }
                            img src=(thumb.source) alt=(thumb.caption) loading="lazy";
                        }
                    }
                }
            }
        }
    }
}

fn render_element(element: &MediaElement) -> Markup {
    let opacity = if element.visible {
        "opacity: 1"
    } else {
        "opacity: 0"
    };
    let src = element.source.as_deref().unwrap_or_default();
    html! {
        @match element.kind {
            MediaKind::Image => {
                img src=(src) alt=(element.alt) style=(opacity);
            }
            MediaKind::Video => {
                video src=(src) controls[element.controls] autoplay[element.autoplay] style=(opacity) {}
            }
        }
    }
}

fn kind_name(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

/// A standalone preview page wrapping the gallery fragment.
pub fn render_page(host: &HeadlessHost, theme: Theme) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Gallery" }
            }
            body class=[theme.body_class()] {
                (render_gallery(host))
            }
        }
    }
}
