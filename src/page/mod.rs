//! Page - The element tree behaviors operate on.
//!
//! A [`Page`] is an explicit handle to one element tree plus its viewport
//! and event plumbing. Nothing in this crate reaches for a process-global
//! document: initializers receive the page they should wire, which keeps
//! several pages independent and lets tests inject a fake tree.
//!
//! Element data lives in columnar reactive arrays indexed by a registry;
//! a host renderer can read any cell inside an effect and re-render on
//! change, or drain the dirty sets for incremental updates.
//!
//! # Example
//!
//! ```ignore
//! use pagewire::page::Page;
//!
//! let page = Page::new();
//! let hero = page.create_element("section");
//! page.add_class(hero, "reveal");
//! page.set_rect(hero, pagewire::Rect::new(0, 0, 1280, 600));
//! ```

pub mod events;
pub mod intersect;

mod arrays;
mod registry;

pub use arrays::{ElementFlags, StyleMap};
pub use spark_signals::DirtySet;

use std::cell::Cell;
use std::rc::{Rc, Weak};

use spark_signals::{Signal, signal};

use crate::types::Rect;

// =============================================================================
// Viewport
// =============================================================================

/// Default viewport size for a fresh page, before the host reports one.
const DEFAULT_VIEWPORT: (i32, i32) = (1280, 800);

pub(crate) struct Viewport {
    scroll_y: Signal<i32>,
    size: Signal<(i32, i32)>,
}

impl Viewport {
    fn new() -> Self {
        Self {
            scroll_y: signal(0),
            size: signal(DEFAULT_VIEWPORT),
        }
    }
}

// =============================================================================
// Page
// =============================================================================

pub(crate) struct PageInner {
    pub(crate) registry: registry::Registry,
    pub(crate) arrays: arrays::ElementArrays,
    pub(crate) events: events::EventRegistry,
    pub(crate) observers: intersect::ObserverRegistry,
    pub(crate) viewport: Viewport,
    body: Cell<usize>,
}

/// Handle to an element tree. Cheap to clone; clones share the tree.
#[derive(Clone)]
pub struct Page {
    inner: Rc<PageInner>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Create an empty page holding only its body element.
    pub fn new() -> Self {
        let page = Self {
            inner: Rc::new(PageInner {
                registry: registry::Registry::new(),
                arrays: arrays::ElementArrays::new(),
                events: events::EventRegistry::new(),
                observers: intersect::ObserverRegistry::new(),
                viewport: Viewport::new(),
                body: Cell::new(0),
            }),
        };
        let body = page.create_element("body");
        page.inner.body.set(body);
        page
    }

    pub(crate) fn downgrade(&self) -> Weak<PageInner> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn events(&self) -> &events::EventRegistry {
        &self.inner.events
    }

    pub(crate) fn observers(&self) -> &intersect::ObserverRegistry {
        &self.inner.observers
    }

    /// The body element.
    pub fn body(&self) -> usize {
        self.inner.body.get()
    }

    // =========================================================================
    // Element Lifecycle
    // =========================================================================

    /// Create an element. Inside [`Page::with_parent`] the new element is
    /// parented automatically; otherwise it starts detached.
    pub fn create_element(&self, tag: &str) -> usize {
        self.create_element_inner(tag, None)
    }

    /// Create an element with a stable id. Creating an id twice returns
    /// the existing element.
    pub fn create_element_with_id(&self, tag: &str, id: &str) -> usize {
        self.create_element_inner(tag, Some(id))
    }

    fn create_element_inner(&self, tag: &str, id: Option<&str>) -> usize {
        let registry = &self.inner.registry;
        let arrays = &self.inner.arrays;

        // An existing id is returned untouched, keeping its place in the tree
        if let Some(id) = id {
            if let Some(existing) = registry.index_of(id) {
                return existing;
            }
        }

        let index = registry.allocate(id);
        arrays.ensure_capacity(index);
        arrays.set_tag(index, tag.to_string());
        arrays.set_parent(index, registry.current_parent());
        index
    }

    /// Run `f` with `parent` as the parent context, so elements created
    /// inside are appended to it.
    pub fn with_parent(&self, parent: usize, f: impl FnOnce()) {
        self.inner.registry.push_parent(parent);
        f();
        self.inner.registry.pop_parent();
    }

    /// Reparent `child` under `parent`.
    pub fn append_child(&self, parent: usize, child: usize) {
        self.inner.arrays.set_parent(child, Some(parent));
    }

    /// Remove an element and its subtree. Runs remove callbacks, detaches
    /// handlers and observers, clears the element's cells and returns the
    /// index to the pool.
    pub fn remove_element(&self, index: usize) {
        if !self.inner.registry.is_allocated(index) {
            return;
        }

        // Children first, so callbacks see a consistent tree
        for child in self.children_of(index) {
            self.remove_element(child);
        }

        for callback in self.inner.registry.take_remove_callbacks(index) {
            callback();
        }

        self.inner.events.remove_element_handlers(index);
        self.inner.observers.remove_element_observers(index);
        self.inner.arrays.clear_at_index(index);
        self.inner.registry.release(index);
    }

    /// Register a callback to run when the element is removed.
    pub fn on_remove(&self, index: usize, callback: impl FnOnce() + 'static) {
        self.inner.registry.on_remove(index, callback);
    }

    // =========================================================================
    // Tree Queries
    // =========================================================================

    /// Look up an element by id.
    pub fn element_by_id(&self, id: &str) -> Option<usize> {
        self.inner.registry.index_of(id)
    }

    /// The id of an element, if it is attached.
    pub fn id_of(&self, index: usize) -> Option<String> {
        self.inner.registry.id_of(index)
    }

    /// Whether an index refers to a live element.
    pub fn is_attached(&self, index: usize) -> bool {
        self.inner.registry.is_allocated(index)
    }

    /// All live elements, in creation order.
    pub fn elements(&self) -> Vec<usize> {
        self.inner.registry.allocated()
    }

    /// Number of live elements (body included).
    pub fn element_count(&self) -> usize {
        self.inner.registry.count()
    }

    /// Parent of an element.
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.inner.arrays.parent(index)
    }

    /// Direct children of an element, in creation order.
    pub fn children_of(&self, index: usize) -> Vec<usize> {
        self.elements()
            .into_iter()
            .filter(|&child| self.inner.arrays.parent(child) == Some(index))
            .collect()
    }

    /// All descendants of an element, depth-first.
    pub fn descendants_of(&self, index: usize) -> Vec<usize> {
        let mut result = Vec::new();
        let mut stack = self.children_of(index);
        stack.reverse();
        while let Some(element) = stack.pop() {
            result.push(element);
            let mut children = self.children_of(element);
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// Tag name of an element.
    pub fn tag_of(&self, index: usize) -> String {
        self.inner.arrays.tag(index)
    }

    /// All elements with the given tag, in creation order.
    pub fn elements_with_tag(&self, tag: &str) -> Vec<usize> {
        self.elements()
            .into_iter()
            .filter(|&element| self.inner.arrays.tag(element) == tag)
            .collect()
    }

    /// All elements carrying the given class, in creation order.
    pub fn elements_with_class(&self, class: &str) -> Vec<usize> {
        self.elements()
            .into_iter()
            .filter(|&element| self.has_class(element, class))
            .collect()
    }

    /// All elements carrying the given attribute, in creation order.
    pub fn elements_with_attr(&self, name: &str) -> Vec<usize> {
        self.elements()
            .into_iter()
            .filter(|&element| self.inner.arrays.has_attr(element, name))
            .collect()
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// The element's full class string.
    pub fn class_name(&self, index: usize) -> String {
        self.inner.arrays.classes(index)
    }

    /// Replace the element's class string.
    pub fn set_class_name(&self, index: usize, classes: &str) {
        self.inner.arrays.set_classes(index, classes.to_string());
    }

    /// Whether the element carries a class.
    pub fn has_class(&self, index: usize, class: &str) -> bool {
        self.inner
            .arrays
            .classes(index)
            .split_whitespace()
            .any(|candidate| candidate == class)
    }

    /// Add a class (no-op when already present).
    pub fn add_class(&self, index: usize, class: &str) {
        let current = self.inner.arrays.peek_classes(index);
        if current.split_whitespace().any(|candidate| candidate == class) {
            return;
        }
        let updated = if current.is_empty() {
            class.to_string()
        } else {
            format!("{current} {class}")
        };
        self.inner.arrays.set_classes(index, updated);
    }

    /// Remove a class (no-op when absent).
    pub fn remove_class(&self, index: usize, class: &str) {
        let current = self.inner.arrays.peek_classes(index);
        if !current.split_whitespace().any(|candidate| candidate == class) {
            return;
        }
        let updated = current
            .split_whitespace()
            .filter(|candidate| *candidate != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.inner.arrays.set_classes(index, updated);
    }

    /// Toggle a class; returns whether it is present afterwards.
    pub fn toggle_class(&self, index: usize, class: &str) -> bool {
        if self.has_class(index, class) {
            self.remove_class(index, class);
            false
        } else {
            self.add_class(index, class);
            true
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Text content of an element.
    pub fn text(&self, index: usize) -> String {
        self.inner.arrays.text(index)
    }

    /// Write an element's text content.
    pub fn set_text(&self, index: usize, text: &str) {
        self.inner.arrays.set_text(index, text.to_string());
    }

    // =========================================================================
    // Control Value / Bounds
    // =========================================================================

    /// Current value of a control.
    pub fn value(&self, index: usize) -> String {
        self.inner.arrays.value(index)
    }

    /// Write a control's value. This is host-side state: behaviors only
    /// read values, the host writes them and dispatches the input event.
    pub fn set_value(&self, index: usize, value: &str) {
        self.inner.arrays.set_value(index, value.to_string());
    }

    /// Declared minimum of a bounded control.
    pub fn min(&self, index: usize) -> i64 {
        self.inner.arrays.min(index)
    }

    /// Declared maximum of a bounded control.
    pub fn max(&self, index: usize) -> i64 {
        self.inner.arrays.max(index)
    }

    /// Set a bounded control's declared range.
    pub fn set_range(&self, index: usize, min: i64, max: i64) {
        self.inner.arrays.set_min(index, min);
        self.inner.arrays.set_max(index, max);
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Read an attribute.
    pub fn attr(&self, index: usize, name: &str) -> Option<String> {
        self.inner.arrays.attr(index, name)
    }

    /// Write an attribute.
    pub fn set_attr(&self, index: usize, name: &str, value: &str) {
        self.inner
            .arrays
            .set_attr(index, name.to_string(), value.to_string());
    }

    /// Whether the element carries an attribute.
    pub fn has_attr(&self, index: usize, name: &str) -> bool {
        self.inner.arrays.has_attr(index, name)
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// The element's inline style map.
    pub fn style(&self, index: usize) -> StyleMap {
        self.inner.arrays.style(index)
    }

    /// Read one inline style property.
    pub fn style_get(&self, index: usize, property: &str) -> Option<String> {
        self.inner.arrays.style(index).get(property).cloned()
    }

    /// Set one inline style property.
    pub fn set_style(&self, index: usize, property: &str, value: &str) {
        let mut style = self.inner.arrays.peek_style(index);
        style.insert(property.to_string(), value.to_string());
        self.inner.arrays.set_style(index, style);
    }

    /// Clear one inline style property.
    pub fn clear_style(&self, index: usize, property: &str) {
        let mut style = self.inner.arrays.peek_style(index);
        if style.remove(property).is_some() {
            self.inner.arrays.set_style(index, style);
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Bounding rect of an element, in document coordinates.
    pub fn rect(&self, index: usize) -> Rect {
        self.inner.arrays.rect(index)
    }

    /// Supply an element's bounding rect (host layout).
    pub fn set_rect(&self, index: usize, rect: Rect) {
        self.inner.arrays.set_rect(index, rect);
    }

    // =========================================================================
    // Flags
    // =========================================================================

    /// One-shot behavior flags of an element.
    pub fn flags(&self, index: usize) -> ElementFlags {
        self.inner.arrays.flags(index)
    }

    /// Insert flags on an element.
    pub fn insert_flags(&self, index: usize, flags: ElementFlags) {
        let mut current = self.inner.arrays.flags(index);
        current.insert(flags);
        self.inner.arrays.set_flags(index, current);
    }

    /// Remove flags from an element.
    pub fn remove_flags(&self, index: usize, flags: ElementFlags) {
        let mut current = self.inner.arrays.flags(index);
        current.remove(flags);
        self.inner.arrays.set_flags(index, current);
    }

    // =========================================================================
    // Dirty Sets
    // =========================================================================
    //
    // Writes mark the element index in the group's dirty set. A host
    // renderer drains these for incremental updates, then clears them.

    /// Indices whose tag, parent or classes changed.
    pub fn core_dirty(&self) -> DirtySet {
        self.inner.arrays.core_dirty()
    }

    /// Indices whose text content changed.
    pub fn text_dirty(&self) -> DirtySet {
        self.inner.arrays.text_dirty()
    }

    /// Indices whose style or rect changed.
    pub fn visual_dirty(&self) -> DirtySet {
        self.inner.arrays.visual_dirty()
    }

    /// Indices whose control value or flags changed.
    pub fn interaction_dirty(&self) -> DirtySet {
        self.inner.arrays.interaction_dirty()
    }

    /// Clear all dirty sets after the host consumed them.
    pub fn clear_dirty(&self) {
        self.inner.arrays.clear_dirty();
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Current scroll position.
    pub fn scroll_y(&self) -> i32 {
        self.inner.viewport.scroll_y.get()
    }

    pub(crate) fn set_scroll_y(&self, y: i32) {
        self.inner.viewport.scroll_y.set(y);
    }

    /// Current viewport size.
    pub fn viewport_size(&self) -> (i32, i32) {
        self.inner.viewport.size.get()
    }

    /// Report the viewport size (host window).
    pub fn set_viewport_size(&self, width: i32, height: i32) {
        self.inner.viewport.size.set((width, height));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_exists() {
        let page = Page::new();
        assert_eq!(page.tag_of(page.body()), "body");
        assert_eq!(page.element_count(), 1);
    }

    #[test]
    fn test_with_parent_nests() {
        let page = Page::new();
        let section = page.create_element("section");
        page.append_child(page.body(), section);

        let mut created = 0;
        page.with_parent(section, || {
            created = page.create_element("div");
        });

        assert_eq!(page.parent_of(created), Some(section));
        assert_eq!(page.children_of(section), vec![created]);
    }

    #[test]
    fn test_class_helpers() {
        let page = Page::new();
        let navbar = page.create_element("nav");
        page.set_class_name(navbar, "navbar");

        assert!(page.has_class(navbar, "navbar"));
        assert!(!page.has_class(navbar, "scrolled"));

        page.add_class(navbar, "scrolled");
        assert_eq!(page.class_name(navbar), "navbar scrolled");

        // Adding again is a no-op
        page.add_class(navbar, "scrolled");
        assert_eq!(page.class_name(navbar), "navbar scrolled");

        page.remove_class(navbar, "scrolled");
        assert_eq!(page.class_name(navbar), "navbar");

        assert!(page.toggle_class(navbar, "open"));
        assert!(!page.toggle_class(navbar, "open"));
        assert_eq!(page.class_name(navbar), "navbar");
    }

    #[test]
    fn test_remove_element_recursive() {
        let page = Page::new();
        let list = page.create_element("ul");
        page.append_child(page.body(), list);
        let mut items = Vec::new();
        page.with_parent(list, || {
            for _ in 0..3 {
                items.push(page.create_element("li"));
            }
        });

        assert_eq!(page.element_count(), 5);
        page.remove_element(list);
        assert_eq!(page.element_count(), 1);
        for item in items {
            assert!(!page.is_attached(item));
        }
    }

    #[test]
    fn test_queries() {
        let page = Page::new();
        let link = page.create_element("a");
        page.set_attr(link, "href", "#pricing");
        let card = page.create_element("div");
        page.add_class(card, "card");

        assert_eq!(page.elements_with_tag("a"), vec![link]);
        assert_eq!(page.elements_with_class("card"), vec![card]);
        assert_eq!(page.elements_with_attr("href"), vec![link]);
        assert_eq!(page.element_by_id("missing"), None);
    }

    #[test]
    fn test_style_roundtrip() {
        let page = Page::new();
        let body = page.body();

        page.set_style(body, "overflow", "hidden");
        assert_eq!(page.style_get(body, "overflow").as_deref(), Some("hidden"));

        page.clear_style(body, "overflow");
        assert_eq!(page.style_get(body, "overflow"), None);
    }

    #[test]
    fn test_text_cell_is_reactive() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use spark_signals::effect;

        let page = Page::new();
        let display = page.create_element_with_id("span", "monthly-earnings");

        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let page_clone = page.clone();
        let _stop = effect(move || {
            seen_clone.borrow_mut().push(page_clone.text(display));
        });

        page.set_text(display, "₹1,40,800");

        let seen = seen.borrow();
        assert_eq!(seen.as_slice(), ["".to_string(), "₹1,40,800".to_string()]);
    }
}
