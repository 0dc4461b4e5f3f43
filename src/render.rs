//! HTML page rendering.
//!
//! Pure functions from build data to [`Markup`]; nothing here touches the
//! filesystem. The gallery and site builders decide when each page is written.
//!
//! ## Generated Pages
//!
//! - **Photo pages** (`/{gallery}/{n}.html`): large rendition linked to the
//!   original, previous/next navigation, caption with capture metadata
//! - **Gallery pages** (`/{gallery}/index.html`): 150×150 thumbnail grid
//! - **Front page** (`/index.html`): one cover per published gallery
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Interpolated titles and captions are escaped automatically.

use crate::config::SiteInfo;
use crate::metadata::format_aperture;
use crate::pipeline::PhotoRecord;
use crate::rendition::{Rendition, THUMBNAIL_SIZE};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLESHEET_URL: &str = "/site.css";

/// One published gallery on the front page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverEntry {
    pub gallery_name: String,
    pub gallery_title: String,
    /// Photo whose medium rendition is shown.
    pub index: usize,
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, tracking_id: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                link rel="stylesheet" href=(STYLESHEET_URL);
                @if let Some(id) = tracking_id {
                    (analytics_snippet(id))
                }
            }
            body {
                (content)
            }
        }
    }
}

/// Google Analytics loader with the tracking id embedded as a JS string.
fn analytics_snippet(tracking_id: &str) -> Markup {
    let id_literal = serde_json::to_string(tracking_id)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");
    let js = format!(
        concat!(
            "(function(i,s,o,g,r,a,m){{i[\"GoogleAnalyticsObject\"]=r;i[r]=i[r]||function(){{",
            "(i[r].q=i[r].q||[]).push(arguments)}},i[r].l=1*new Date();a=s.createElement(o),",
            "m=s.getElementsByTagName(o)[0];a.async=1;a.src=g;m.parentNode.insertBefore(a,m)",
            "}})(window,document,\"script\",\"//www.google-analytics.com/analytics.js\",\"ga\");",
            "ga(\"create\", {}, \"auto\");",
            "ga(\"send\", \"pageview\");"
        ),
        id_literal
    );
    html! {
        script { (PreEscaped(js)) }
    }
}

fn site_footer(site: &SiteInfo) -> Markup {
    html! {
        @if let Some(contact) = &site.contact {
            footer {
                a href={ "mailto:" (contact) } { (contact) }
            }
        }
    }
}

fn neighbor_link(label: &str, target: Option<usize>) -> Markup {
    html! {
        @match target {
            Some(n) => {
                a href={ (n) ".html" } { (label) }
            },
            None => {
                span.disabled { (label) }
            },
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the page of a single photo.
///
/// `photo_count` is the number of photos declared in the gallery; the last
/// declared index has its "next" link disabled.
pub fn render_photo_page(
    site: &SiteInfo,
    gallery_title: &str,
    record: &PhotoRecord,
    photo_count: usize,
    tracking_id: Option<&str>,
) -> Markup {
    let n = record.index;
    let previous = n.checked_sub(1);
    let next = (n + 1 < photo_count).then_some(n + 1);
    let page_title = format!("{} {} - {}", site.title, gallery_title, record.title);
    let caption = format!(
        "{}, {} at {}",
        record.taken_at,
        record.shutter_speed,
        format_aperture(record.f_number)
    );

    let content = html! {
        h2 {
            a href={ "/" (record.gallery_name) "/" } { "◀ " (gallery_title) }
        }
        nav {
            (neighbor_link("previous", previous))
            " / "
            (neighbor_link("next", next))
        }
        figure {
            a href={ "original/" (n) ".jpg" } {
                img width=(record.width) height=(record.height)
                    src=(Rendition::Large.url(&record.gallery_name, n))
                    alt=(record.title);
            }
            figcaption {
                h3 { (record.title) }
                span { (caption) }
            }
        }
    };

    base_document(&page_title, tracking_id, content)
}

/// Renders a gallery index with one thumbnail per listed photo, in the order given.
pub fn render_gallery_page(
    site: &SiteInfo,
    gallery_name: &str,
    gallery_title: &str,
    photos: &[PhotoRecord],
    tracking_id: Option<&str>,
) -> Markup {
    let page_title = format!("{} {}", site.title, gallery_title);

    let content = html! {
        h2 { (gallery_title) }
        @for photo in photos {
            span {
                a href={ (photo.index) ".html" } {
                    img width=(THUMBNAIL_SIZE) height=(THUMBNAIL_SIZE)
                        src=(Rendition::Small.url(gallery_name, photo.index))
                        alt=(photo.title);
                }
            }
        }
        h4 {
            a href="/" { (site.title) }
        }
    };

    base_document(&page_title, tracking_id, content)
}

/// Renders the front page from the covers of published galleries.
pub fn render_front_page(site: &SiteInfo, covers: &[CoverEntry]) -> Markup {
    let content = html! {
        h2 { (site.title) }
        @for cover in covers {
            div {
                a href={ "/" (cover.gallery_name) "/" } {
                    img src=(Rendition::Medium.url(&cover.gallery_name, cover.index))
                        alt=(cover.gallery_title);
                }
            }
        }
        (site_footer(site))
    };

    base_document(&site.title, None, content)
}
