//! # linkpage
//!
//! A minimal static generator for "link-in-bio" landing pages. One JSON
//! document describes the page; one HTML file comes out.
//!
//! # Pipeline
//!
//! ```text
//! config.toml ─┐
//! data.json ───┴─> load ─> render ─> html ─> dist/index.html
//! assets/ ─────────────────────────────────> dist/assets/
//! ```
//!
//! Rendering is a fixed sequence of steps against a page shell: profile,
//! links, gallery (optional), socials, theme (optional). Sections missing from
//! `data.json` are skipped. If the document cannot be loaded, no step runs and
//! the default shell is written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The `data.json` document (`PageData` and its parts) |
//! | [`loader`] | Fetches `data.json` from the site directory or a URL |
//! | [`page`] | The page shell: the slots renderers write into |
//! | [`render`] | Profile, links, socials and theme renderers; `PageSession` |
//! | [`gallery`] | Gallery renderer and the `AutoScroll` handle |
//! | [`html`] | Maud templates turning a `Page` into HTML |
//! | [`site`] | Build and check commands: config → render → write |
//! | [`config`] | `config.toml` loading, validation and stock defaults |
//! | [`imaging`] | Image size probing for local gallery images |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Parameterized Renderer
//!
//! Optional behaviours (the gallery, per-platform social classes) are flags
//! in `[features]` rather than separate page variants. Optional data sections
//! are `Option` fields; each render step runs only when its section is
//! present and its feature is on.
//!
//! ## Explicit Auto-Scroll Handle
//!
//! The gallery's repeating scroll is an [`gallery::AutoScroll`] value owned by
//! the [`render::PageSession`], with an explicit, irreversible cancel. The
//! embedded script that drives it in the browser takes every parameter from
//! the page, so the Rust model and the shipped behaviour cannot drift apart.

pub mod config;
pub mod gallery;
pub mod html;
pub mod imaging;
pub mod loader;
pub mod output;
pub mod page;
pub mod render;
pub mod site;
pub mod types;
