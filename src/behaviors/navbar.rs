//! Navbar Scroll Behavior - Class toggle past a scroll threshold.
//!
//! Adds `scrolled` to the navbar once the page scrolls past the
//! threshold and removes it back at the top. One immediate pass at
//! initialization keeps the class in step with the current position.

use tracing::debug;

use crate::page::Page;
use crate::page::events::on_scroll;
use crate::types::Cleanup;

/// Class of the navbar container element.
pub const NAVBAR_CLASS: &str = "navbar";

/// Class applied once scrolled past the threshold.
pub const SCROLLED_CLASS: &str = "scrolled";

/// Scroll position beyond which the navbar counts as scrolled.
pub const SCROLL_THRESHOLD: i32 = 50;

/// Wire the navbar. Returns None when no `.navbar` element exists.
pub fn init_navbar(page: &Page) -> Option<Cleanup> {
    let navbar = page.elements_with_class(NAVBAR_CLASS).into_iter().next()?;
    debug!(navbar, "navbar behavior wired");

    apply(page, navbar, page.scroll_y());
    Some(on_scroll(page, move |page, y| apply(page, navbar, y)))
}

fn apply(page: &Page, navbar: usize, y: i32) {
    if y > SCROLL_THRESHOLD {
        page.add_class(navbar, SCROLLED_CLASS);
    } else {
        page.remove_class(navbar, SCROLLED_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::events::{Event, dispatch};

    fn page_with_navbar() -> (Page, usize) {
        let page = Page::new();
        let navbar = page.create_element("nav");
        page.add_class(navbar, NAVBAR_CLASS);
        page.append_child(page.body(), navbar);
        (page, navbar)
    }

    #[test]
    fn test_threshold_edge() {
        let (page, navbar) = page_with_navbar();
        let _cleanup = init_navbar(&page).unwrap();

        dispatch(&page, Event::Scroll { y: 50 });
        assert!(!page.has_class(navbar, SCROLLED_CLASS));

        dispatch(&page, Event::Scroll { y: 51 });
        assert!(page.has_class(navbar, SCROLLED_CLASS));

        dispatch(&page, Event::Scroll { y: 0 });
        assert!(!page.has_class(navbar, SCROLLED_CLASS));
    }

    #[test]
    fn test_immediate_pass_on_prescrolled_page() {
        let (page, navbar) = page_with_navbar();
        dispatch(&page, Event::Scroll { y: 400 });

        let _cleanup = init_navbar(&page).unwrap();
        assert!(page.has_class(navbar, SCROLLED_CLASS));
    }

    #[test]
    fn test_absent_navbar_is_inert() {
        let page = Page::new();
        assert!(init_navbar(&page).is_none());
    }
}
