//! Mobile Menu Behavior - Hamburger toggle with body scroll lock.
//!
//! Clicking the hamburger toggles its `active` class and the nav's
//! `open` class, locking body overflow while the nav is open. Clicking
//! any link inside the nav closes everything and releases the lock.

use tracing::debug;

use crate::page::Page;
use crate::page::events::on_click;
use crate::types::{Cleanup, combine_cleanups};

/// Class of the hamburger toggle.
pub const HAMBURGER_CLASS: &str = "hamburger";

/// Class of the mobile navigation container.
pub const MOBILE_NAV_CLASS: &str = "mobile-nav";

/// Class of the hamburger while the nav is open.
pub const ACTIVE_CLASS: &str = "active";

/// Class of the nav while open.
pub const OPEN_CLASS: &str = "open";

const OVERFLOW_PROP: &str = "overflow";

/// Wire the mobile menu. Both the hamburger and the nav are required;
/// returns None when either is missing.
pub fn init_mobile_menu(page: &Page) -> Option<Cleanup> {
    let hamburger = page
        .elements_with_class(HAMBURGER_CLASS)
        .into_iter()
        .next()?;
    let nav = page
        .elements_with_class(MOBILE_NAV_CLASS)
        .into_iter()
        .next()?;
    debug!(hamburger, nav, "mobile menu behavior wired");

    let mut cleanups = vec![on_click(page, hamburger, move |page, hamburger| {
        page.toggle_class(hamburger, ACTIVE_CLASS);
        let open = page.toggle_class(nav, OPEN_CLASS);
        if open {
            page.set_style(page.body(), OVERFLOW_PROP, "hidden");
        } else {
            page.clear_style(page.body(), OVERFLOW_PROP);
        }
        false
    })];

    for link in page.descendants_of(nav) {
        if page.tag_of(link) != "a" {
            continue;
        }
        cleanups.push(on_click(page, link, move |page, _| {
            page.remove_class(hamburger, ACTIVE_CLASS);
            page.remove_class(nav, OPEN_CLASS);
            page.clear_style(page.body(), OVERFLOW_PROP);
            false
        }));
    }
    Some(combine_cleanups(cleanups))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::events::{Event, dispatch};

    fn menu_page() -> (Page, usize, usize, usize) {
        let page = Page::new();
        let hamburger = page.create_element("button");
        page.add_class(hamburger, HAMBURGER_CLASS);
        page.append_child(page.body(), hamburger);

        let nav = page.create_element("nav");
        page.add_class(nav, MOBILE_NAV_CLASS);
        page.append_child(page.body(), nav);

        let mut link = 0;
        page.with_parent(nav, || {
            link = page.create_element("a");
        });
        (page, hamburger, nav, link)
    }

    #[test]
    fn test_toggle_locks_body_overflow() {
        let (page, hamburger, nav, _) = menu_page();
        let _cleanup = init_mobile_menu(&page).unwrap();

        dispatch(&page, Event::Click { target: hamburger });
        assert!(page.has_class(hamburger, ACTIVE_CLASS));
        assert!(page.has_class(nav, OPEN_CLASS));
        assert_eq!(
            page.style_get(page.body(), OVERFLOW_PROP).as_deref(),
            Some("hidden")
        );

        dispatch(&page, Event::Click { target: hamburger });
        assert!(!page.has_class(hamburger, ACTIVE_CLASS));
        assert!(!page.has_class(nav, OPEN_CLASS));
        assert_eq!(page.style_get(page.body(), OVERFLOW_PROP), None);
    }

    #[test]
    fn test_link_click_closes_menu() {
        let (page, hamburger, nav, link) = menu_page();
        let _cleanup = init_mobile_menu(&page).unwrap();

        dispatch(&page, Event::Click { target: hamburger });
        assert!(page.has_class(nav, OPEN_CLASS));

        dispatch(&page, Event::Click { target: link });
        assert!(!page.has_class(hamburger, ACTIVE_CLASS));
        assert!(!page.has_class(nav, OPEN_CLASS));
        assert_eq!(page.style_get(page.body(), OVERFLOW_PROP), None);
    }

    #[test]
    fn test_requires_both_elements() {
        let page = Page::new();
        let hamburger = page.create_element("button");
        page.add_class(hamburger, HAMBURGER_CLASS);
        // No .mobile-nav on the page
        assert!(init_mobile_menu(&page).is_none());
    }
}
