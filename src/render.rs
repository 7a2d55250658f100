//! The page renderer.
//!
//! Rendering is a fixed sequence run once per load:
//!
//! ```text
//! load data.json → profile → links → gallery? → socials → theme?
//! ```
//!
//! Each step writes into the [`Page`] shell. A missing section in the data
//! skips its step without comment. A failed load skips *every* step: the
//! error is logged and the page keeps its default state.
//!
//! [`PageSession`] owns the result of one load: the page, the gallery's
//! [`AutoScroll`] handle if a gallery was rendered, and a [`RenderReport`]
//! of the steps that ran.

use crate::config::{FeaturesConfig, SiteConfig};
use crate::gallery::{self, AutoScroll};
use crate::imaging::ImageBackend;
use crate::loader::{self, DataSource, LoadError};
use crate::page::{
    ACCENT_VAR, BACKGROUND_VAR, LinkCard, Page, SocialLink, StyleVars, TEXT_VAR,
};
use crate::types::{LinkEntry, PageData, Profile, SocialEntry, Theme};
use std::path::Path;

/// A render step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Profile,
    Links,
    Gallery,
    Socials,
    Theme,
}

/// What a load did.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub steps: Vec<Step>,
    /// Set when loading failed and nothing was rendered.
    pub load_error: Option<LoadError>,
}

impl RenderReport {
    pub fn ran(&self, step: Step) -> bool {
        self.steps.contains(&step)
    }
}

/// Everything needed to render besides the data itself.
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    /// Directory local image URLs resolve against. `None` skips probing.
    pub site_dir: Option<&'a Path>,
    pub backend: &'a dyn ImageBackend,
}

/// One page load.
#[derive(Debug)]
pub struct PageSession {
    pub page: Page,
    pub auto_scroll: Option<AutoScroll>,
    pub report: RenderReport,
}

impl PageSession {
    /// Fetch the document and render it into a fresh shell.
    ///
    /// Load failures are logged and swallowed; check `report.load_error`.
    pub fn load(source: &DataSource, ctx: &RenderContext<'_>) -> Self {
        let mut session = Self::blank(ctx.config);
        match loader::load(source) {
            Ok(data) => session.render(&data, ctx),
            Err(e) => {
                tracing::error!(source = %source, error = %e, "Error loading data");
                session.report.load_error = Some(e);
            }
        }
        session
    }

    /// Render already-loaded data into a fresh shell.
    pub fn from_data(data: &PageData, ctx: &RenderContext<'_>) -> Self {
        let mut session = Self::blank(ctx.config);
        session.render(data, ctx);
        session
    }

    fn blank(config: &SiteConfig) -> Self {
        Self {
            page: Page::shell(config),
            auto_scroll: None,
            report: RenderReport::default(),
        }
    }

    /// Run every applicable render step against the current page.
    pub fn render(&mut self, data: &PageData, ctx: &RenderContext<'_>) {
        let features = ctx.config.features;
        let steps = &mut self.report.steps;
        steps.clear();

        if let Some(profile) = &data.profile {
            render_profile(&mut self.page, profile);
            steps.push(Step::Profile);
        }
        if let Some(links) = &data.links {
            render_links(&mut self.page, links, u64::from(ctx.config.links.stagger_ms));
            steps.push(Step::Links);
        }
        if let (Some(images), Some(section)) = (&data.gallery, self.page.gallery.as_mut()) {
            let scroll = gallery::render_gallery(
                section,
                images,
                ctx.site_dir,
                ctx.backend,
                &ctx.config.gallery,
            );
            // A new timer replaces the old one.
            if let Some(previous) = self.auto_scroll.as_mut() {
                previous.cancel();
            }
            self.auto_scroll = Some(scroll);
            steps.push(Step::Gallery);
        }
        if let Some(socials) = &data.socials {
            render_socials(&mut self.page, socials, &features);
            steps.push(Step::Socials);
        }
        if let Some(theme) = &data.theme {
            apply_theme(&mut self.page.style, theme);
            steps.push(Step::Theme);
        }

        tracing::info!(steps = ?self.report.steps, "page rendered");
    }

    /// Forward a touch on the gallery to the auto-scroll handle.
    pub fn touch_gallery(&mut self) {
        if let Some(scroll) = self.auto_scroll.as_mut() {
            scroll.touch_start();
        }
    }
}

/// Write name, description and avatar into their placeholders.
///
/// Absent or empty fields leave the placeholder as it was. A name also becomes the
/// document title; an avatar reveals the image.
pub fn render_profile(page: &mut Page, profile: &Profile) {
    if let Some(name) = non_empty(&profile.name) {
        page.name = name.to_string();
        page.title = name.to_string();
    }
    if let Some(description) = non_empty(&profile.description) {
        page.description = description.to_string();
    }
    if let Some(avatar) = non_empty(&profile.avatar) {
        page.avatar.src = Some(avatar.to_string());
        page.avatar.hidden = false;
    }
}

/// Clear the links container and append one card per entry, in order.
///
/// Card `i` gets an animation delay of `i * stagger_ms`.
pub fn render_links(page: &mut Page, links: &[LinkEntry], stagger_ms: u64) {
    page.links.clear();
    for (index, link) in (0u64..).zip(links) {
        page.links.append(LinkCard {
            href: link.url.clone(),
            title: link.title.clone(),
            icon: non_empty(&link.icon).map(str::to_string),
            animation_delay_ms: index * stagger_ms,
        });
    }
}

/// Clear the socials container and append one icon link per entry.
pub fn render_socials(page: &mut Page, socials: &[SocialEntry], features: &FeaturesConfig) {
    page.socials.clear();
    for social in socials {
        let classes = if features.platform_classes {
            vec![platform_class(&social.platform)]
        } else {
            Vec::new()
        };
        page.socials.append(SocialLink {
            href: social.url.clone(),
            aria_label: social.platform.clone(),
            classes,
            icon: non_empty(&social.icon).map(str::to_string),
        });
    }
}

/// `social-link-<platform>` with the platform lowercased and whitespace
/// runs collapsed to `-`, so the hook stays a single class token.
pub fn platform_class(platform: &str) -> String {
    let slug = platform
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("social-link-{slug}")
}

/// Override the root color variables the theme sets; leave the rest.
pub fn apply_theme(style: &mut StyleVars, theme: &Theme) {
    if let Some(accent) = non_empty(&theme.accent_color) {
        style.set_property(ACCENT_VAR, accent);
    }
    if let Some(background) = non_empty(&theme.background_color) {
        style.set_property(BACKGROUND_VAR, background);
    }
    if let Some(text) = non_empty(&theme.text_color) {
        style.set_property(TEXT_VAR, text);
    }
}

/// An empty string counts as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
