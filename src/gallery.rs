//! Gallery rendering and auto-scroll.
//!
//! The gallery is a horizontal strip of lazily loaded images. Once rendered
//! it scrolls itself: every `interval_ms` it advances by one item width plus
//! the gap, and when it is within `end_tolerance_px` of the end it snaps back
//! to the start. Hovering skips a tick without stopping the timer. The first
//! touch stops it for good.
//!
//! [`AutoScroll`] is that behaviour as an explicit handle. The renderer
//! returns it to the caller, which owns it for the life of the page; the
//! embedded `static/gallery.js` runs the same decisions in the browser,
//! reading its parameters from `data-*` attributes on the container.

use crate::config::{GalleryConfig, ProcessingConfig, effective_threads};
use crate::imaging::ImageBackend;
use crate::page::{GalleryItem, GallerySection};
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Browser side of [`AutoScroll`].
pub const SCRIPT: &str = include_str!("../static/gallery.js");

/// What one auto-scroll tick does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
    /// Cancelled by a touch; the timer no longer fires.
    Stopped,
    /// Pointer is over the gallery; this tick is skipped.
    Paused,
    /// No gallery item to measure a step from.
    Idle,
    /// Smooth-scroll back to position 0.
    ResetToStart,
    /// Smooth-scroll right by this many pixels.
    Advance(f64),
}

/// Scroll geometry of the gallery container at tick time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
    /// Width of the first gallery item, `None` when there is none.
    pub item_width: Option<f64>,
}

impl ScrollMetrics {
    pub fn max_scroll(&self) -> f64 {
        self.scroll_width - self.client_width
    }
}

/// Single-owner handle to the repeating auto-scroll task.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoScroll {
    interval: Duration,
    gap: f64,
    tolerance: f64,
    cancelled: bool,
}

impl AutoScroll {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            interval: Duration::from_millis(u64::from(config.interval_ms)),
            gap: f64::from(config.gap_px),
            tolerance: f64::from(config.end_tolerance_px),
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled
    }

    /// Stop the timer. There is no way to restart it.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// A touch on the gallery cancels auto-scroll.
    pub fn touch_start(&mut self) {
        if !self.cancelled {
            tracing::debug!("gallery touched, auto-scroll stopped");
        }
        self.cancel();
    }

    /// Decide what the tick at `metrics` does.
    pub fn tick(&self, metrics: &ScrollMetrics, hovered: bool) -> ScrollAction {
        if self.cancelled {
            return ScrollAction::Stopped;
        }
        if hovered {
            return ScrollAction::Paused;
        }
        let Some(item_width) = metrics.item_width else {
            return ScrollAction::Idle;
        };
        if metrics.scroll_left >= metrics.max_scroll() - self.tolerance {
            ScrollAction::ResetToStart
        } else {
            ScrollAction::Advance(item_width + self.gap)
        }
    }
}

/// Clear and rebuild the gallery section from `images`, then start
/// auto-scroll.
///
/// Local images (relative paths under `site_dir`) are measured with
/// `backend`, in parallel, so their `<img>` tags carry a size. Remote images
/// and unreadable files are left unsized.
pub fn render_gallery(
    section: &mut GallerySection,
    images: &[String],
    site_dir: Option<&Path>,
    backend: &dyn ImageBackend,
    config: &GalleryConfig,
) -> AutoScroll {
    let sizes = probe_dimensions(images, site_dir, backend);

    section.items.clear();
    for (src, dimensions) in images.iter().zip(sizes) {
        section.items.append(GalleryItem {
            src: src.clone(),
            dimensions,
        });
    }
    section.hidden = false;

    AutoScroll::new(config)
}

/// Measure every local image. Results are in input order.
pub fn probe_dimensions(
    images: &[String],
    site_dir: Option<&Path>,
    backend: &dyn ImageBackend,
) -> Vec<Option<(u32, u32)>> {
    let Some(site_dir) = site_dir else {
        return vec![None; images.len()];
    };
    images
        .par_iter()
        .map(|src| {
            let path = local_path(site_dir, src)?;
            match backend.identify(&path) {
                Ok(dims) => Some((dims.width, dims.height)),
                Err(e) => {
                    tracing::debug!(src = %src, error = %e, "gallery image left unsized");
                    None
                }
            }
        })
        .collect()
}

/// Configure the global rayon pool used for probing.
///
/// Ignored when the pool was already initialized.
pub fn init_thread_pool(processing: &ProcessingConfig) {
    let threads = effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Resolve an image URL to a file inside `site_dir`.
///
/// Returns `None` for anything with a scheme, protocol-relative URLs, and
/// paths that climb out of the site directory.
fn local_path(site_dir: &Path, src: &str) -> Option<PathBuf> {
    if src.is_empty() || src.contains("://") || src.starts_with("//") || src.starts_with("data:")
    {
        return None;
    }
    let path_part = src.split(['?', '#']).next().unwrap_or(src);
    let relative = Path::new(path_part.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    Some(site_dir.join(relative))
}
