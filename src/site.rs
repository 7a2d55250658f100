//! Site build: config → load → render → write.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html        # The rendered page
//! └── assets/           # Copied verbatim from <site>/assets (if present)
//!     ├── avatar.jpg
//!     └── ...
//! ```
//!
//! A page document that fails to load does not fail the build: the default
//! shell is written instead, exactly as a visitor would have seen it. Use
//! [`check`] to turn that case into an error.

use crate::config::{self, SiteConfig};
use crate::gallery;
use crate::html;
use crate::imaging::{ImageBackend, RustBackend};
use crate::loader::{DataSource, LoadError};
use crate::render::{PageSession, RenderContext};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Inputs for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub site_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `--data` override: a path relative to the site, or an http(s) URL.
    pub data: Option<String>,
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildResult {
    pub config: SiteConfig,
    pub source: DataSource,
    pub session: PageSession,
    pub index_path: PathBuf,
    pub assets_copied: usize,
}

/// Load config, render the page and write the output directory.
pub fn build(options: &BuildOptions) -> Result<BuildResult, BuildError> {
    build_with_backend(options, &RustBackend::new())
}

pub fn build_with_backend(
    options: &BuildOptions,
    backend: &dyn ImageBackend,
) -> Result<BuildResult, BuildError> {
    let config = config::load_config(&options.site_dir)?;
    gallery::init_thread_pool(&config.processing);
    let source = resolve_source(&options.site_dir, &config, options.data.as_deref());

    let session = render_session(&options.site_dir, &config, &source, backend);

    fs::create_dir_all(&options.output_dir)?;
    let markup = html::render_document(&session.page, &config.gallery);
    let index_path = options.output_dir.join("index.html");
    fs::write(&index_path, markup.into_string())?;
    tracing::info!(path = %index_path.display(), "wrote page");

    let assets_src = options.site_dir.join(&config.assets_dir);
    let assets_copied = if assets_src.is_dir() {
        copy_dir_recursive(&assets_src, &options.output_dir.join(&config.assets_dir))?
    } else {
        0
    };

    Ok(BuildResult {
        config,
        source,
        session,
        index_path,
        assets_copied,
    })
}

/// Load and render without writing anything.
///
/// Unlike [`build`], a load failure is returned as an error.
pub fn check(site_dir: &Path, data: Option<&str>) -> Result<PageSession, BuildError> {
    let config = config::load_config(site_dir)?;
    let source = resolve_source(site_dir, &config, data);
    let mut session = render_session(site_dir, &config, &source, &RustBackend::new());
    match session.report.load_error.take() {
        Some(e) => Err(BuildError::Load(e)),
        None => Ok(session),
    }
}

fn resolve_source(site_dir: &Path, config: &SiteConfig, data: Option<&str>) -> DataSource {
    match data {
        Some(arg) => DataSource::parse(arg, site_dir),
        None => DataSource::in_site(site_dir, &config.data_file),
    }
}

fn render_session(
    site_dir: &Path,
    config: &SiteConfig,
    source: &DataSource,
    backend: &dyn ImageBackend,
) -> PageSession {
    let ctx = RenderContext {
        config,
        site_dir: Some(site_dir),
        backend,
    };
    PageSession::load(source, &ctx)
}

/// Copy every file under `src` into `dst`, keeping the layout.
/// Returns the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
