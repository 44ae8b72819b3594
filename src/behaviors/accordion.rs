//! Accordion Behavior - Exclusive open/close within a group.
//!
//! Clicking an `.accordion-header` closes every `.accordion-item` that
//! shares the item's parent, then re-opens the clicked item unless it was
//! already open. At most one item per group is active.

use tracing::debug;

use crate::page::Page;
use crate::page::events::on_click;
use crate::types::{Cleanup, combine_cleanups};

/// Class of the clickable header inside each item.
pub const HEADER_CLASS: &str = "accordion-header";

/// Class of an accordion item (the header's parent).
pub const ITEM_CLASS: &str = "accordion-item";

/// Class of the currently open item.
pub const ACTIVE_CLASS: &str = "active";

/// Wire accordion headers. Returns None when no header exists.
pub fn init_accordions(page: &Page) -> Option<Cleanup> {
    let headers = page.elements_with_class(HEADER_CLASS);
    if headers.is_empty() {
        return None;
    }
    debug!(count = headers.len(), "accordion behavior wired");

    let cleanups = headers
        .into_iter()
        .map(|header| {
            on_click(page, header, |page, header| {
                let Some(item) = page.parent_of(header) else {
                    return false;
                };
                let was_active = page.has_class(item, ACTIVE_CLASS);

                // Close every item in the same group
                match page.parent_of(item) {
                    Some(group) => {
                        for sibling in page.children_of(group) {
                            if page.has_class(sibling, ITEM_CLASS) {
                                page.remove_class(sibling, ACTIVE_CLASS);
                            }
                        }
                    }
                    None => page.remove_class(item, ACTIVE_CLASS),
                }

                if !was_active {
                    page.add_class(item, ACTIVE_CLASS);
                }
                false
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
    use crate::page::events::{Event, dispatch};

    /// Build a group of `n` accordion items, returning (items, headers).
    fn accordion_page(n: usize) -> (Page, Vec<usize>, Vec<usize>) {
        let page = Page::new();
        let group = page.create_element("div");
        page.append_child(page.body(), group);

        let mut items = Vec::new();
        let mut headers = Vec::new();
        for _ in 0..n {
            let item = page.create_element("div");
            page.add_class(item, ITEM_CLASS);
            page.append_child(group, item);
            let header = page.create_element("div");
            page.add_class(header, HEADER_CLASS);
            page.append_child(item, header);
            items.push(item);
            headers.push(header);
        }
        (page, items, headers)
    }

    #[test]
    fn test_open_and_reclick_closes() {
        let (page, items, headers) = accordion_page(3);
        let _cleanup = init_accordions(&page).unwrap();

        dispatch(&page, Event::Click { target: headers[1] });
        assert!(page.has_class(items[1], ACTIVE_CLASS));

        dispatch(&page, Event::Click { target: headers[1] });
        assert!(!page.has_class(items[1], ACTIVE_CLASS));
    }

    #[test]
    fn test_exclusive_within_group() {
        let (page, items, headers) = accordion_page(3);
        let _cleanup = init_accordions(&page).unwrap();

        dispatch(&page, Event::Click { target: headers[0] });
        dispatch(&page, Event::Click { target: headers[2] });

        assert!(!page.has_class(items[0], ACTIVE_CLASS));
        assert!(!page.has_class(items[1], ACTIVE_CLASS));
        assert!(page.has_class(items[2], ACTIVE_CLASS));
    }

    #[test]
    fn test_independent_groups() {
        let page = Page::new();
        let mut headers = Vec::new();
        let mut items = Vec::new();
        for _ in 0..2 {
            let group = page.create_element("div");
            page.append_child(page.body(), group);
            let item = page.create_element("div");
            page.add_class(item, ITEM_CLASS);
            page.append_child(group, item);
            let header = page.create_element("div");
            page.add_class(header, HEADER_CLASS);
            page.append_child(item, header);
            items.push(item);
            headers.push(header);
        }
        let _cleanup = init_accordions(&page).unwrap();

        dispatch(&page, Event::Click { target: headers[0] });
        dispatch(&page, Event::Click { target: headers[1] });

        // Opening in one group leaves the other group's item open
        assert!(page.has_class(items[0], ACTIVE_CLASS));
        assert!(page.has_class(items[1], ACTIVE_CLASS));
    }

    #[test]
    fn test_no_headers_is_inert() {
        let page = Page::new();
        assert!(init_accordions(&page).is_none());
    }
}
