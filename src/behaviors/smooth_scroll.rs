//! Smooth Scroll Behavior - Anchor clicks scroll to their target.
//!
//! Links whose `href` starts with `#` scroll the viewport to the target
//! element's top edge, consuming the click. Links whose target does not
//! exist fall through untouched, as does a bare `#`.

use tracing::debug;

use crate::page::Page;
use crate::page::events::{Event, dispatch, on_click};
use crate::types::{Cleanup, combine_cleanups};

/// Wire anchor links. Returns None when no `a[href^="#"]` exists.
pub fn init_smooth_scroll(page: &Page) -> Option<Cleanup> {
    let anchors: Vec<usize> = page
        .elements_with_tag("a")
        .into_iter()
        .filter(|&anchor| {
            page.attr(anchor, "href")
                .is_some_and(|href| href.starts_with('#'))
        })
        .collect();
    if anchors.is_empty() {
        return None;
    }
    debug!(count = anchors.len(), "smooth scroll behavior wired");

    let cleanups = anchors
        .into_iter()
        .map(|anchor| {
            on_click(page, anchor, |page, anchor| {
                let Some(href) = page.attr(anchor, "href") else {
                    return false;
                };
                let target_id = match href.strip_prefix('#') {
                    Some(id) if !id.is_empty() => id.to_string(),
                    _ => return false,
                };
                let Some(target) = page.element_by_id(&target_id) else {
                    return false;
                };
                dispatch(page, Event::Scroll { y: page.rect(target).y });
                true
            })
        })
        .collect();
    Some(combine_cleanups(cleanups))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    #[test]
    fn test_click_scrolls_to_target() {
        let page = Page::new();
        let link = page.create_element("a");
        page.set_attr(link, "href", "#pricing");
        let section = page.create_element_with_id("section", "pricing");
        page.set_rect(section, Rect::new(0, 2400, 1280, 600));

        let _cleanup = init_smooth_scroll(&page).unwrap();
        let consumed = dispatch(&page, Event::Click { target: link });

        assert!(consumed);
        assert_eq!(page.scroll_y(), 2400);
    }

    #[test]
    fn test_missing_target_not_consumed() {
        let page = Page::new();
        let link = page.create_element("a");
        page.set_attr(link, "href", "#nowhere");

        let _cleanup = init_smooth_scroll(&page).unwrap();
        assert!(!dispatch(&page, Event::Click { target: link }));
        assert_eq!(page.scroll_y(), 0);
    }

    #[test]
    fn test_external_links_ignored() {
        let page = Page::new();
        let external = page.create_element("a");
        page.set_attr(external, "href", "https://example.com");
        let anchor = page.create_element("a");
        page.set_attr(anchor, "href", "#top");
        page.create_element_with_id("div", "top");

        let _cleanup = init_smooth_scroll(&page).unwrap();
        // Only the in-page anchor is wired
        assert!(!dispatch(&page, Event::Click { target: external }));
        assert!(dispatch(&page, Event::Click { target: anchor }));
    }

    #[test]
    fn test_no_anchors_is_inert() {
        let page = Page::new();
        page.create_element("a");
        assert!(init_smooth_scroll(&page).is_none());
    }
}
