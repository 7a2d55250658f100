//! The page shell: every element the renderers write into.
//!
//! A freshly built [`Page`] is the pre-load default state: empty name and
//! description, a hidden avatar, empty containers, a hidden gallery section
//! and the configured default colors. Renderers only ever mutate the slots
//! exposed here; they never add structure of their own.
//!
//! Element ids in the generated HTML match the slot names:
//!
//! | Slot | Element |
//! |------|---------|
//! | `name` | `#name` |
//! | `description` | `#description` |
//! | `avatar` | `img#avatar` (class `hidden` until an avatar is set) |
//! | `links` | `#links-container` |
//! | `gallery` | `#gallery-container` (only when the gallery feature is on) |
//! | `socials` | `#socials-container` |
//! | `style` | `:root` custom properties |

use crate::config::SiteConfig;
use std::collections::BTreeMap;

/// Browsing context every outbound link opens in.
pub const LINK_TARGET: &str = "_blank";
/// Keeps the opened page from seeing the referrer or `window.opener`.
pub const SAFE_REL: &str = "noopener noreferrer";

pub const ACCENT_VAR: &str = "--accent";
pub const BACKGROUND_VAR: &str = "--bg-color";
pub const TEXT_VAR: &str = "--text-color";

/// Alt text given to every gallery image.
pub const GALLERY_ALT: &str = "Gallery Image";

/// An element whose children can only be cleared or appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T> {
    children: Vec<T>,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<T> Container<T> {
    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: T) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.children.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.children.first()
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub src: Option<String>,
    pub hidden: bool,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            src: None,
            hidden: true,
        }
    }
}

/// A rendered link card.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCard {
    pub href: String,
    pub title: String,
    /// Leading glyph classes. `None` means no glyph element at all.
    pub icon: Option<String>,
    pub animation_delay_ms: u64,
}

/// A rendered social icon link.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub href: String,
    pub aria_label: String,
    /// Extra classes beyond `social-link`.
    pub classes: Vec<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub src: String,
    /// Intrinsic pixel size, when the image is a readable local file.
    pub dimensions: Option<(u32, u32)>,
}

/// The gallery section; stays hidden until the gallery renderer fills it.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySection {
    pub hidden: bool,
    pub items: Container<GalleryItem>,
}

impl Default for GallerySection {
    fn default() -> Self {
        Self {
            hidden: true,
            items: Container::default(),
        }
    }
}

/// Global style variables on the document root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleVars {
    vars: BTreeMap<String, String>,
}

impl StyleVars {
    pub fn set_property(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Render as a `:root { ... }` block.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.vars {
            css.push_str(&format!("    {name}: {value};\n"));
        }
        css.push('}');
        css
    }
}

/// The whole addressable page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub lang: String,
    pub title: String,
    pub icon_stylesheet: Option<String>,
    pub name: String,
    pub description: String,
    pub avatar: Avatar,
    pub links: Container<LinkCard>,
    /// `None` when the gallery feature is disabled: there is no container.
    pub gallery: Option<GallerySection>,
    pub socials: Container<SocialLink>,
    pub style: StyleVars,
}

impl Page {
    /// The pre-load default state for a site.
    pub fn shell(config: &SiteConfig) -> Self {
        let mut style = StyleVars::default();
        style.set_property(ACCENT_VAR, &config.colors.accent);
        style.set_property(BACKGROUND_VAR, &config.colors.background);
        style.set_property(TEXT_VAR, &config.colors.text);

        let icon_stylesheet = Some(config.page.icon_stylesheet.clone()).filter(|s| !s.is_empty());

        Self {
            lang: config.page.lang.clone(),
            title: config.page.title.clone(),
            icon_stylesheet,
            name: String::new(),
            description: String::new(),
            avatar: Avatar::default(),
            links: Container::default(),
            gallery: config.features.gallery.then(GallerySection::default),
            socials: Container::default(),
            style,
        }
    }
}
