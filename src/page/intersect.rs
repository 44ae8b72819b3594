//! Intersection Observers - Viewport visibility notifications.
//!
//! Observers watch an element's host-supplied rect against the scrolled
//! viewport and fire on the rising edge: the callback runs when the
//! element goes from not-intersecting to intersecting at the configured
//! threshold. Observers are re-evaluated after every scroll or resize
//! dispatch, and on demand via [`check_observers`] (the initial pass after
//! wiring a page).
//!
//! `root_margin_bottom` adjusts the bottom edge of the viewport before
//! the test; a negative value shrinks it, so elements only count as
//! visible once they are clearly above the fold.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::Page;
use crate::types::Cleanup;

// =============================================================================
// Options
// =============================================================================

/// Observation tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectOptions {
    /// Fraction of the element's area that must be inside the viewport
    /// before it counts as intersecting. Zero means any overlap.
    pub threshold: f64,
    /// Adjustment of the viewport's bottom edge, in document units.
    pub root_margin_bottom: i32,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin_bottom: 0,
        }
    }
}

/// Callback fired when an element starts intersecting.
pub type IntersectCallback = Rc<dyn Fn(&Page, usize)>;

// =============================================================================
// Observer Registry
// =============================================================================

struct Observer {
    id: usize,
    element: usize,
    options: IntersectOptions,
    was_intersecting: bool,
    callback: IntersectCallback,
}

pub(crate) struct ObserverRegistry {
    observers: RefCell<Vec<Observer>>,
    next_id: Cell<usize>,
}

impl ObserverRegistry {
    pub(crate) fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    fn remove(&self, id: usize) {
        self.observers
            .borrow_mut()
            .retain(|observer| observer.id != id);
    }

    /// Drop observers watching a removed element.
    pub(crate) fn remove_element_observers(&self, index: usize) {
        self.observers
            .borrow_mut()
            .retain(|observer| observer.element != index);
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Observe an element. The callback fires each time the element enters
/// the viewport at the given threshold. Returns an unobserve cleanup.
pub fn observe(
    page: &Page,
    element: usize,
    options: IntersectOptions,
    callback: impl Fn(&Page, usize) + 'static,
) -> Cleanup {
    let registry = page.observers();
    let id = registry.next_id.get();
    registry.next_id.set(id + 1);

    registry.observers.borrow_mut().push(Observer {
        id,
        element,
        options,
        was_intersecting: false,
        callback: Rc::new(callback),
    });

    let inner = page.downgrade();
    Box::new(move || {
        if let Some(inner) = inner.upgrade() {
            inner.observers.remove(id);
        }
    })
}

/// Current intersection ratio of an element against the viewport,
/// with the bottom edge adjusted by `root_margin_bottom`.
///
/// Zero-area elements never intersect.
pub fn intersection_ratio(page: &Page, element: usize, root_margin_bottom: i32) -> f64 {
    let rect = page.rect(element);
    let area = rect.area();
    if area == 0 {
        return 0.0;
    }

    let (width, height) = page.viewport_size();
    let top = page.scroll_y();
    let bottom = top + height + root_margin_bottom;

    let overlap_w = rect.right().min(width) - rect.x.max(0);
    let overlap_h = rect.bottom().min(bottom) - rect.y.max(top);
    if overlap_w <= 0 || overlap_h <= 0 {
        return 0.0;
    }

    (overlap_w as i64 * overlap_h as i64) as f64 / area as f64
}

/// Re-evaluate every observer and fire rising-edge callbacks.
///
/// Runs automatically after scroll and resize dispatch; call directly
/// after supplying rects to get the initial observation pass.
pub fn check_observers(page: &Page) {
    // Phase one: update edge state under the borrow, collect callbacks.
    let mut fired: Vec<(usize, IntersectCallback)> = Vec::new();
    {
        let mut observers = page.observers().observers.borrow_mut();
        for observer in observers.iter_mut() {
            if !page.is_attached(observer.element) {
                observer.was_intersecting = false;
                continue;
            }
            let ratio = intersection_ratio(page, observer.element, observer.options.root_margin_bottom);
            let intersecting = if observer.options.threshold > 0.0 {
                ratio >= observer.options.threshold
            } else {
                ratio > 0.0
            };
            if intersecting && !observer.was_intersecting {
                fired.push((observer.element, observer.callback.clone()));
            }
            observer.was_intersecting = intersecting;
        }
    }

    // Phase two: run callbacks with the borrow released, so they may
    // observe or unobserve freely.
    for (element, callback) in fired {
        callback(page, element);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::page::events::{Event, dispatch};
    use crate::types::Rect;

    fn page_with_viewport() -> Page {
        let page = Page::new();
        page.set_viewport_size(1000, 800);
        page
    }

    #[test]
    fn test_ratio_fully_visible() {
        let page = page_with_viewport();
        let element = page.create_element("div");
        page.set_rect(element, Rect::new(0, 100, 500, 200));

        assert_eq!(intersection_ratio(&page, element, 0), 1.0);
    }

    #[test]
    fn test_ratio_below_fold() {
        let page = page_with_viewport();
        let element = page.create_element("div");
        page.set_rect(element, Rect::new(0, 2000, 500, 200));

        assert_eq!(intersection_ratio(&page, element, 0), 0.0);
    }

    #[test]
    fn test_ratio_half_visible() {
        let page = page_with_viewport();
        let element = page.create_element("div");
        // Bottom half hangs below an 800-tall viewport
        page.set_rect(element, Rect::new(0, 700, 500, 200));

        let ratio = intersection_ratio(&page, element, 0);
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_root_margin_shrinks_viewport() {
        let page = page_with_viewport();
        let element = page.create_element("div");
        page.set_rect(element, Rect::new(0, 760, 500, 40));

        assert!(intersection_ratio(&page, element, 0) > 0.0);
        assert_eq!(intersection_ratio(&page, element, -50), 0.0);
    }

    #[test]
    fn test_zero_area_never_intersects() {
        let page = page_with_viewport();
        let element = page.create_element("div");
        page.set_rect(element, Rect::new(0, 0, 0, 0));

        assert_eq!(intersection_ratio(&page, element, 0), 0.0);
    }

    #[test]
    fn test_rising_edge_fires_once_per_entry() {
        let page = page_with_viewport();
        let element = page.create_element("div");
        page.set_rect(element, Rect::new(0, 1200, 500, 100));

        let fired = std::rc::Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        let _cleanup = observe(
            &page,
            element,
            IntersectOptions {
                threshold: 0.5,
                root_margin_bottom: 0,
            },
            move |_, _| fired_clone.set(fired_clone.get() + 1),
        );

        // Not visible yet
        check_observers(&page);
        assert_eq!(fired.get(), 0);

        // Scroll it into view: fires once
        dispatch(&page, Event::Scroll { y: 600 });
        assert_eq!(fired.get(), 1);

        // Still visible: no re-fire
        dispatch(&page, Event::Scroll { y: 650 });
        assert_eq!(fired.get(), 1);

        // Away and back: fires again
        dispatch(&page, Event::Scroll { y: 0 });
        dispatch(&page, Event::Scroll { y: 600 });
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_unobserve() {
        let page = page_with_viewport();
        let element = page.create_element("div");
        page.set_rect(element, Rect::new(0, 100, 100, 100));

        let fired = std::rc::Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        let cleanup = observe(&page, element, IntersectOptions::default(), move |_, _| {
            fired_clone.set(fired_clone.get() + 1)
        });

        cleanup();
        check_observers(&page);
        assert_eq!(fired.get(), 0);
    }
}
