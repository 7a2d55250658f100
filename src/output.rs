//! CLI output formatting.
//!
//! Output is **information-centric**: each section of the rendered page is
//! listed with its entries in display order, each entry leading with its
//! positional index, with URLs and sizes as trailing context.
//!
//! ```text
//! Profile
//!     Alex
//!     Maker of small things
//!     Avatar: assets/me.jpg
//! Links
//!     001 Portfolio → https://alex.dev
//!     002 Blog → https://alex.dev/blog
//! Gallery (2 images, every 3000ms)
//!     001 assets/1.jpg (800×1000)
//!     002 https://cdn.example.com/2.jpg
//! Socials
//!     001 GitHub → https://github.com/alex
//! Theme
//!     --accent: #ff0066
//!
//! index.html → dist/index.html
//! ```
//!
//! Each `format_*` function returns `Vec<String>` for testability and has a
//! `print_*` wrapper that writes to stdout. Format functions are pure: no
//! I/O, no side effects.

use crate::page::{ACCENT_VAR, BACKGROUND_VAR, TEXT_VAR};
use crate::render::{PageSession, Step};
use crate::site::BuildResult;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Format the rendered sections of a session.
pub fn format_session(session: &PageSession) -> Vec<String> {
    let mut lines = Vec::new();
    let page = &session.page;
    let report = &session.report;

    if let Some(e) = &report.load_error {
        lines.push(format!("Error loading data: {}", e));
        lines.push(format!("{}Nothing rendered; page left at its defaults", indent(1)));
        return lines;
    }

    for step in &report.steps {
        match step {
            Step::Profile => {
                lines.push("Profile".to_string());
                if !page.name.is_empty() {
                    lines.push(format!("{}{}", indent(1), page.name));
                }
                if !page.description.is_empty() {
                    lines.push(format!(
                        "{}{}",
                        indent(1),
                        truncate_desc(page.description.trim(), 60)
                    ));
                }
                if let Some(src) = &page.avatar.src {
                    lines.push(format!("{}Avatar: {}", indent(1), src));
                }
            }
            Step::Links => {
                lines.push("Links".to_string());
                for (i, card) in page.links.iter().enumerate() {
                    lines.push(format!(
                        "{}{} {} \u{2192} {}",
                        indent(1),
                        format_index(i + 1),
                        card.title,
                        card.href
                    ));
                }
            }
            Step::Gallery => {
                let Some(section) = &page.gallery else {
                    continue;
                };
                let interval = session
                    .auto_scroll
                    .as_ref()
                    .map(|s| s.interval().as_millis())
                    .unwrap_or_default();
                lines.push(format!(
                    "Gallery ({} images, every {}ms)",
                    section.items.len(),
                    interval
                ));
                for (i, item) in section.items.iter().enumerate() {
                    let size = item
                        .dimensions
                        .map(|(w, h)| format!(" ({}\u{00d7}{})", w, h))
                        .unwrap_or_default();
                    lines.push(format!(
                        "{}{} {}{}",
                        indent(1),
                        format_index(i + 1),
                        item.src,
                        size
                    ));
                }
            }
            Step::Socials => {
                lines.push("Socials".to_string());
                for (i, social) in page.socials.iter().enumerate() {
                    lines.push(format!(
                        "{}{} {} \u{2192} {}",
                        indent(1),
                        format_index(i + 1),
                        social.aria_label,
                        social.href
                    ));
                }
            }
            Step::Theme => {
                lines.push("Theme".to_string());
                for var in [ACCENT_VAR, BACKGROUND_VAR, TEXT_VAR] {
                    if let Some(value) = page.style.get(var) {
                        lines.push(format!("{}{}: {}", indent(1), var, value));
                    }
                }
            }
        }
    }

    lines
}

/// Format the result of a full build.
pub fn format_build_output(result: &BuildResult) -> Vec<String> {
    let mut lines = vec![format!("Data: {}", result.source)];
    lines.extend(format_session(&result.session));
    lines.push(String::new());
    lines.push(format!(
        "index.html \u{2192} {}",
        result.index_path.display()
    ));
    if result.assets_copied > 0 {
        lines.push(format!(
            "{}/ \u{2192} {} files copied",
            result.config.assets_dir, result.assets_copied
        ));
    }
    lines
}

/// Print session output to stdout.
pub fn print_session(session: &PageSession) {
    for line in format_session(session) {
        println!("{}", line);
    }
}

/// Print build output to stdout.
pub fn print_build_output(result: &BuildResult) {
    for line in format_build_output(result) {
        println!("{}", line);
    }
}
