//! HTML output for a rendered [`Page`].
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! every value coming from `data.json` is escaped on interpolation.
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles, preceded by the page's `:root` variables
//! - `static/gallery.js`: auto-scroll, only emitted when a gallery container exists

use crate::config::GalleryConfig;
use crate::gallery;
use crate::page::{GalleryItem, GallerySection, LINK_TARGET, LinkCard, Page, SAFE_REL, SocialLink};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Render the complete document.
pub fn render_document(page: &Page, gallery_config: &GalleryConfig) -> Markup {
    let css = format!("{}\n\n{}", page.style.to_css(), CSS_STATIC);
    let avatar_class = if page.avatar.hidden {
        "avatar hidden"
    } else {
        "avatar"
    };

    html! {
        (DOCTYPE)
        html lang=(page.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title) }
                @if let Some(href) = &page.icon_stylesheet {
                    link rel="stylesheet" href=(href);
                }
                style { (css) }
            }
            body {
                main.container {
                    header.profile {
                        img id="avatar" class=(avatar_class) src=[page.avatar.src.as_deref()] alt="Avatar";
                        h1 id="name" { (page.name) }
                        p id="description" { (page.description) }
                    }
                    nav id="links-container" class="links" {
                        @for card in &page.links {
                            (link_card(card))
                        }
                    }
                    @if let Some(section) = &page.gallery {
                        (gallery_section(section, gallery_config))
                    }
                    footer id="socials-container" class="socials" {
                        @for social in &page.socials {
                            (social_link(social))
                        }
                    }
                }
                @if page.gallery.as_ref().is_some_and(|s| !s.hidden) {
                    script { (PreEscaped(gallery::SCRIPT)) }
                }
            }
        }
    }
}

fn link_card(card: &LinkCard) -> Markup {
    let delay = format!("animation-delay: {}ms", card.animation_delay_ms);
    html! {
        a class="link-card" href=(card.href) target=(LINK_TARGET) rel=(SAFE_REL) style=(delay) {
            div.link-content {
                @if let Some(icon) = &card.icon {
                    i class={ (icon) " link-icon" } {}
                }
                span.link-title { (card.title) }
            }
            i.fa-solid.fa-chevron-right.link-arrow {}
        }
    }
}

fn gallery_section(section: &GallerySection, config: &GalleryConfig) -> Markup {
    // The stylesheet lays items out with this gap; the script steps by it.
    let gap = format!("--gallery-gap: {}px", config.gap_px);
    html! {
        section class="gallery-section" hidden[section.hidden] {
            div id="gallery-container" class="gallery" style=(gap)
                data-interval=(config.interval_ms)
                data-gap=(config.gap_px)
                data-tolerance=(config.end_tolerance_px) {
                @for item in &section.items {
                    (gallery_item(item))
                }
            }
        }
    }
}

fn gallery_item(item: &GalleryItem) -> Markup {
    let width = item.dimensions.map(|(w, _)| w);
    let height = item.dimensions.map(|(_, h)| h);
    html! {
        div.gallery-item {
            img src=(item.src) alt=(crate::page::GALLERY_ALT) loading="lazy" width=[width] height=[height];
        }
    }
}

fn social_link(social: &SocialLink) -> Markup {
    let class = std::iter::once("social-link")
        .chain(social.classes.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    html! {
        a class=(class) href=(social.href) target=(LINK_TARGET) rel=(SAFE_REL) aria-label=(social.aria_label) {
            @if let Some(icon) = &social.icon {
                i class=(icon) {}
            }
        }
    }
}
