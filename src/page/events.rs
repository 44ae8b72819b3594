//! Event System - Synchronous dispatch and handler registries.
//!
//! The host owns the real input sources (pointer, scrolling, control
//! widgets) and delivers notifications through [`dispatch`]. Handlers are
//! registered per element (`on_input`, `on_click`) or page-wide
//! (`on_scroll`, `on_mouse_move`, `on_resize`) and return cleanups.
//!
//! Dispatch is synchronous and single-threaded: every handler runs to
//! completion, in registration order, before `dispatch` returns. There is
//! no queueing and no overlap between events. A click handler may return
//! `true` to consume the event (the default-prevented analog); consumption
//! is reported to the host but does not stop sibling handlers.
//!
//! For control values the contract mirrors the host page: the control owns
//! its value. The host writes the new value first, then dispatches
//! `Input { target }`; the event only notifies subscribers.
//!
//! # Example
//!
//! ```ignore
//! use pagewire::page::{Page, events};
//!
//! let page = Page::new();
//! let slider = page.create_element_with_id("input", "calc-hours");
//!
//! let cleanup = events::on_input(&page, slider, |page, target| {
//!     println!("value now {}", page.value(target));
//! });
//!
//! page.set_value(slider, "8");
//! events::dispatch(&page, events::Event::Input { target: slider });
//! cleanup();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{Page, intersect};
use crate::types::Cleanup;

// =============================================================================
// Events
// =============================================================================

/// A notification delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A control's value changed (the host has already written it).
    Input { target: usize },
    /// An element was activated.
    Click { target: usize },
    /// The viewport scrolled to `y`.
    Scroll { y: i32 },
    /// The viewport was resized.
    Resize { width: i32, height: i32 },
    /// The pointer moved, in viewport coordinates.
    MouseMove { x: i32, y: i32 },
}

// =============================================================================
// Handler Types
// =============================================================================

/// Handler for per-element events. Receives the page and the target index.
pub type ElementHandler = Rc<dyn Fn(&Page, usize)>;

/// Click handler. Return true to consume the event.
pub type ClickHandler = Rc<dyn Fn(&Page, usize) -> bool>;

/// Scroll handler. Receives the new scroll position.
pub type ScrollHandler = Rc<dyn Fn(&Page, i32)>;

/// Pointer handler. Receives viewport-relative coordinates.
pub type PointerHandler = Rc<dyn Fn(&Page, i32, i32)>;

/// Resize handler. Receives the new viewport size.
pub type ResizeHandler = Rc<dyn Fn(&Page, i32, i32)>;

// =============================================================================
// Handler Registry
// =============================================================================

pub(crate) struct EventRegistry {
    input: RefCell<HashMap<usize, Vec<(usize, ElementHandler)>>>,
    click: RefCell<HashMap<usize, Vec<(usize, ClickHandler)>>>,
    scroll: RefCell<Vec<(usize, ScrollHandler)>>,
    mouse_move: RefCell<Vec<(usize, PointerHandler)>>,
    resize: RefCell<Vec<(usize, ResizeHandler)>>,
    next_id: Cell<usize>,
}

impl EventRegistry {
    pub(crate) fn new() -> Self {
        Self {
            input: RefCell::new(HashMap::new()),
            click: RefCell::new(HashMap::new()),
            scroll: RefCell::new(Vec::new()),
            mouse_move: RefCell::new(Vec::new()),
            resize: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    fn next_id(&self) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn remove_input(&self, target: usize, id: usize) {
        if let Some(handlers) = self.input.borrow_mut().get_mut(&target) {
            handlers.retain(|(handler_id, _)| *handler_id != id);
        }
    }

    fn remove_click(&self, target: usize, id: usize) {
        if let Some(handlers) = self.click.borrow_mut().get_mut(&target) {
            handlers.retain(|(handler_id, _)| *handler_id != id);
        }
    }

    /// Drop every handler attached to an element (element removal).
    pub(crate) fn remove_element_handlers(&self, index: usize) {
        self.input.borrow_mut().remove(&index);
        self.click.borrow_mut().remove(&index);
    }
}

// =============================================================================
// Subscription API
// =============================================================================

/// Subscribe to value-change notifications on a control.
pub fn on_input(page: &Page, target: usize, handler: impl Fn(&Page, usize) + 'static) -> Cleanup {
    let registry = page.events();
    let id = registry.next_id();
    registry
        .input
        .borrow_mut()
        .entry(target)
        .or_default()
        .push((id, Rc::new(handler)));

    let inner = page.downgrade();
    Box::new(move || {
        if let Some(inner) = inner.upgrade() {
            inner.events.remove_input(target, id);
        }
    })
}

/// Subscribe to clicks on an element.
pub fn on_click(
    page: &Page,
    target: usize,
    handler: impl Fn(&Page, usize) -> bool + 'static,
) -> Cleanup {
    let registry = page.events();
    let id = registry.next_id();
    registry
        .click
        .borrow_mut()
        .entry(target)
        .or_default()
        .push((id, Rc::new(handler)));

    let inner = page.downgrade();
    Box::new(move || {
        if let Some(inner) = inner.upgrade() {
            inner.events.remove_click(target, id);
        }
    })
}

/// Subscribe to viewport scroll notifications.
pub fn on_scroll(page: &Page, handler: impl Fn(&Page, i32) + 'static) -> Cleanup {
    let registry = page.events();
    let id = registry.next_id();
    registry.scroll.borrow_mut().push((id, Rc::new(handler)));

    let inner = page.downgrade();
    Box::new(move || {
        if let Some(inner) = inner.upgrade() {
            inner
                .events
                .scroll
                .borrow_mut()
                .retain(|(handler_id, _)| *handler_id != id);
        }
    })
}

/// Subscribe to pointer movement.
pub fn on_mouse_move(page: &Page, handler: impl Fn(&Page, i32, i32) + 'static) -> Cleanup {
    let registry = page.events();
    let id = registry.next_id();
    registry.mouse_move.borrow_mut().push((id, Rc::new(handler)));

    let inner = page.downgrade();
    Box::new(move || {
        if let Some(inner) = inner.upgrade() {
            inner
                .events
                .mouse_move
                .borrow_mut()
                .retain(|(handler_id, _)| *handler_id != id);
        }
    })
}

/// Subscribe to viewport resize notifications.
pub fn on_resize(page: &Page, handler: impl Fn(&Page, i32, i32) + 'static) -> Cleanup {
    let registry = page.events();
    let id = registry.next_id();
    registry.resize.borrow_mut().push((id, Rc::new(handler)));

    let inner = page.downgrade();
    Box::new(move || {
        if let Some(inner) = inner.upgrade() {
            inner
                .events
                .resize
                .borrow_mut()
                .retain(|(handler_id, _)| *handler_id != id);
        }
    })
}

// =============================================================================
// Dispatch
// =============================================================================

/// Deliver an event to its subscribers.
///
/// Returns true when a click handler consumed the event. Handler lists
/// are snapshotted before running, so handlers registered during dispatch
/// take effect from the next event on.
pub fn dispatch(page: &Page, event: Event) -> bool {
    match event {
        Event::Input { target } => {
            for handler in input_handlers(page, target) {
                handler(page, target);
            }
            false
        }
        Event::Click { target } => {
            let mut consumed = false;
            for handler in click_handlers(page, target) {
                consumed |= handler(page, target);
            }
            consumed
        }
        Event::Scroll { y } => {
            page.set_scroll_y(y);
            let handlers: Vec<ScrollHandler> = page
                .events()
                .scroll
                .borrow()
                .iter()
                .map(|(_, handler)| handler.clone())
                .collect();
            for handler in handlers {
                handler(page, y);
            }
            intersect::check_observers(page);
            false
        }
        Event::Resize { width, height } => {
            page.set_viewport_size(width, height);
            let handlers: Vec<ResizeHandler> = page
                .events()
                .resize
                .borrow()
                .iter()
                .map(|(_, handler)| handler.clone())
                .collect();
            for handler in handlers {
                handler(page, width, height);
            }
            intersect::check_observers(page);
            false
        }
        Event::MouseMove { x, y } => {
            let handlers: Vec<PointerHandler> = page
                .events()
                .mouse_move
                .borrow()
                .iter()
                .map(|(_, handler)| handler.clone())
                .collect();
            for handler in handlers {
                handler(page, x, y);
            }
            false
        }
    }
}

fn input_handlers(page: &Page, target: usize) -> Vec<ElementHandler> {
    page.events()
        .input
        .borrow()
        .get(&target)
        .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
        .unwrap_or_default()
}

fn click_handlers(page: &Page, target: usize) -> Vec<ClickHandler> {
    page.events()
        .click
        .borrow()
        .get(&target)
        .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
        .unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_input_targets_one_element() {
        let page = Page::new();
        let hours = page.create_element("input");
        let rate = page.create_element("input");

        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        let _cleanup = on_input(&page, hours, move |_, _| {
            fired_clone.set(fired_clone.get() + 1);
        });

        dispatch(&page, Event::Input { target: rate });
        assert_eq!(fired.get(), 0);

        dispatch(&page, Event::Input { target: hours });
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_cleanup_detaches_handler() {
        let page = Page::new();
        let button = page.create_element("button");

        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        let cleanup = on_click(&page, button, move |_, _| {
            fired_clone.set(fired_clone.get() + 1);
            false
        });

        dispatch(&page, Event::Click { target: button });
        cleanup();
        dispatch(&page, Event::Click { target: button });
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_click_consumption() {
        let page = Page::new();
        let link = page.create_element("a");

        let _c1 = on_click(&page, link, |_, _| true);
        let second_ran = Rc::new(Cell::new(false));
        let second_ran_clone = second_ran.clone();
        let _c2 = on_click(&page, link, move |_, _| {
            second_ran_clone.set(true);
            false
        });

        // Consumption is reported but does not stop sibling handlers
        assert!(dispatch(&page, Event::Click { target: link }));
        assert!(second_ran.get());
    }

    #[test]
    fn test_scroll_updates_viewport_before_handlers() {
        let page = Page::new();

        let seen = Rc::new(Cell::new(-1));
        let seen_clone = seen.clone();
        let _cleanup = on_scroll(&page, move |page, y| {
            assert_eq!(page.scroll_y(), y);
            seen_clone.set(y);
        });

        dispatch(&page, Event::Scroll { y: 120 });
        assert_eq!(seen.get(), 120);
        assert_eq!(page.scroll_y(), 120);
    }

    #[test]
    fn test_handlers_registered_during_dispatch_deferred() {
        let page = Page::new();
        let button = page.create_element("button");

        let late_fired = Rc::new(Cell::new(0));
        let late_fired_outer = late_fired.clone();
        let page_clone = page.clone();
        let _c1 = on_click(&page, button, move |_, target| {
            let late_fired = late_fired_outer.clone();
            // Registering from inside a handler must not fire this dispatch
            std::mem::forget(on_click(&page_clone, target, move |_, _| {
                late_fired.set(late_fired.get() + 1);
                false
            }));
            false
        });

        dispatch(&page, Event::Click { target: button });
        assert_eq!(late_fired.get(), 0);

        dispatch(&page, Event::Click { target: button });
        assert_eq!(late_fired.get(), 1);
    }
}
