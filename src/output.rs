//! CLI output formatting for the build and check commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every gallery and photo
//! leads with its positional index and title; source files and output pages
//! are shown as secondary context. Positions are 1-based for reading, while
//! page and rendition file names keep the 0-based photo index.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Galleries
//! 001 Iceland (2 photos, published)
//!     001 Skógafoss
//!         Source: DSC_0001.jpg
//!     002 Vík
//!         Source: DSC_0002.jpg
//!
//! Missing sources
//!     resources/images/DSC_0002.jpg
//! ```
//!
//! ## Build progress
//!
//! ```text
//! Iceland (2 photos)
//!     001 Skógafoss → 0.html
//!         Source: DSC_0001.jpg
//!     002 Vík → skipped
//!         Source: DSC_0002.jpg
//!         Error: cannot read capture metadata: ...
//!     1 written, 1 skipped
//! ```
//!
//! ## Build summary
//!
//! ```text
//! Front page → index.html
//! 001 Iceland → iceland/index.html
//!     Photos: 1/2
//!     Cover: iceland/medium/0.jpg
//! Stylesheet: copied from resources
//!
//! Generated 1 gallery, 1 photo page, 1 skipped
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::Config;
use crate::gallery::BuildEvent;
use crate::rendition::Rendition;
use crate::site::{SiteReport, Stylesheet};
use std::path::PathBuf;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

/// Photo line keyed by its 0-based index, displayed 1-based.
///
/// ```text
/// 001 Skógafoss
/// 002 Reynisfjara
/// ```
fn photo_line(index: usize, title: &str) -> String {
    format!("{} {}", format_index(index + 1), title)
}

// ============================================================================
// Check
// ============================================================================

/// Format the declared galleries and any missing source files.
pub fn format_check_output(config: &Config, missing: &[PathBuf]) -> Vec<String> {
    let mut lines = vec!["Galleries".to_string()];

    for (pos, gallery) in config.galleries.iter().enumerate() {
        let mut detail = plural(gallery.images.len(), "photo", "photos");
        if gallery.publish {
            detail.push_str(", published");
        }
        lines.push(format!(
            "{} {} ({})",
            format_index(pos + 1),
            gallery.title,
            detail
        ));
        for (index, image) in gallery.images.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                photo_line(index, &image.title)
            ));
            lines.push(format!("{}Source: {}", indent(2), image.filename));
        }
    }

    if !missing.is_empty() {
        lines.push(String::new());
        lines.push("Missing sources".to_string());
        for path in missing {
            lines.push(format!("{}{}", indent(1), path.display()));
        }
    }

    lines
}

pub fn print_check_output(config: &Config, missing: &[PathBuf]) {
    for line in format_check_output(config, missing) {
        println!("{}", line);
    }
}

// ============================================================================
// Build progress
// ============================================================================

/// Format a single build progress event as display lines.
///
/// Photos of a gallery finish in arbitrary order, so photo lines may appear
/// out of positional order.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::GalleryStarted {
            title, photo_count, ..
        } => vec![format!(
            "{} ({})",
            title,
            plural(*photo_count, "photo", "photos")
        )],
        BuildEvent::PhotoWritten {
            index,
            title,
            filename,
        } => vec![
            format!(
                "{}{} \u{2192} {}.html",
                indent(1),
                photo_line(*index, title),
                index
            ),
            format!("{}Source: {}", indent(2), filename),
        ],
        BuildEvent::PhotoFailed {
            index,
            title,
            filename,
            error,
        } => vec![
            format!(
                "{}{} \u{2192} skipped",
                indent(1),
                photo_line(*index, title)
            ),
            format!("{}Source: {}", indent(2), filename),
            format!("{}Error: {}", indent(2), error),
        ],
        BuildEvent::GalleryFinished {
            written, failed, ..
        } => vec![format!("{}{} written, {} skipped", indent(1), written, failed)],
    }
}

// ============================================================================
// Build summary
// ============================================================================

/// Format the end-of-build summary: pages per gallery, covers, skipped photos.
pub fn format_site_report(report: &SiteReport) -> Vec<String> {
    let mut lines = vec!["Front page \u{2192} index.html".to_string()];

    for (pos, gallery) in report.galleries.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}/index.html",
            format_index(pos + 1),
            gallery.title,
            gallery.name
        ));
        lines.push(format!(
            "{}Photos: {}/{}",
            indent(1),
            gallery.photos.len(),
            gallery.declared
        ));
        if let Some(cover) = &gallery.cover {
            let url = Rendition::Medium.url(&cover.gallery_name, cover.index);
            lines.push(format!(
                "{}Cover: {}",
                indent(1),
                url.trim_start_matches('/')
            ));
        }
    }

    lines.push(match report.stylesheet {
        Stylesheet::Copied => "Stylesheet: copied from resources".to_string(),
        Stylesheet::Default => "Stylesheet: built-in default".to_string(),
    });

    let skipped: Vec<String> = report
        .galleries
        .iter()
        .flat_map(|g| {
            g.failures.iter().map(move |f| {
                format!(
                    "{}{} #{} {}: {}",
                    indent(1),
                    g.name,
                    f.index,
                    f.filename,
                    f.error
                )
            })
        })
        .collect();
    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        lines.extend(skipped);
    }

    lines.push(String::new());
    let mut summary = format!(
        "Generated {}, {}",
        plural(report.galleries.len(), "gallery", "galleries"),
        plural(report.photos_written(), "photo page", "photo pages")
    );
    if report.photos_failed() > 0 {
        summary.push_str(&format!(", {} skipped", report.photos_failed()));
    }
    lines.push(summary);

    lines
}

pub fn print_site_report(report: &SiteReport) {
    for line in format_site_report(report) {
        println!("{}", line);
    }
}
