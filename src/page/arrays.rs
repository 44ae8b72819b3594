//! Element Arrays - Columnar reactive storage for element data.
//!
//! Each element property lives in its own array cell, indexed by the
//! element's registry index:
//! - tag / parent / classes: tree structure and class strings
//! - text: text content written by display sinks
//! - value / min / max: bounded numeric control state
//! - style / rect: inline style map and host-supplied geometry
//! - flags: one-shot behavior state
//!
//! Cells use `TrackedSlotArray` so reads inside deriveds and effects
//! register fine-grained dependencies. Writes additionally mark the index
//! in a per-group `DirtySet`; a host renderer can drain those sets for
//! incremental updates instead of re-reading everything:
//! - core: tag, parent, classes
//! - text: text content
//! - visual: style, rect
//! - interaction: value, min, max, flags
//!
//! The attribute map is plain storage; attributes are read at wiring
//! time, not inside render effects.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use bitflags::bitflags;
use spark_signals::{DirtySet, TrackedSlotArray, dirty_set, tracked_slot_array};

use crate::types::Rect;

/// Inline style property map (`left`, `transform`, ...).
pub type StyleMap = BTreeMap<String, String>;

// =============================================================================
// Element Flags
// =============================================================================

bitflags! {
    /// One-shot per-element behavior state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ElementFlags: u8 {
        /// A count-up animation has already been triggered for this element.
        const COUNTED = 1 << 0;
        /// A tilt transform is currently applied to this element.
        const TILTED = 1 << 1;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// Arrays
// =============================================================================

pub(crate) struct ElementArrays {
    /// Dirty set for structure (tag, parent, classes).
    core_dirty: DirtySet,
    /// Dirty set for text content.
    text_dirty: DirtySet,
    /// Dirty set for style and geometry.
    visual_dirty: DirtySet,
    /// Dirty set for control values and flags.
    interaction_dirty: DirtySet,

    tag: TrackedSlotArray<String>,
    parent: TrackedSlotArray<Option<usize>>,
    classes: TrackedSlotArray<String>,
    text: TrackedSlotArray<String>,
    value: TrackedSlotArray<String>,
    min: TrackedSlotArray<i64>,
    max: TrackedSlotArray<i64>,
    style: TrackedSlotArray<StyleMap>,
    rect: TrackedSlotArray<Rect>,
    flags: TrackedSlotArray<ElementFlags>,

    /// Attribute map (`href`, `data-counter`, ...). Plain storage.
    attrs: RefCell<HashMap<usize, HashMap<String, String>>>,
}

impl ElementArrays {
    pub(crate) fn new() -> Self {
        let core_dirty = dirty_set();
        let text_dirty = dirty_set();
        let visual_dirty = dirty_set();
        let interaction_dirty = dirty_set();

        Self {
            tag: tracked_slot_array(Some(String::new()), core_dirty.clone()),
            parent: tracked_slot_array(Some(None), core_dirty.clone()),
            classes: tracked_slot_array(Some(String::new()), core_dirty.clone()),
            text: tracked_slot_array(Some(String::new()), text_dirty.clone()),
            value: tracked_slot_array(Some(String::new()), interaction_dirty.clone()),
            // Bounded-control defaults mirror a range input
            min: tracked_slot_array(Some(0), interaction_dirty.clone()),
            max: tracked_slot_array(Some(100), interaction_dirty.clone()),
            style: tracked_slot_array(Some(StyleMap::new()), visual_dirty.clone()),
            rect: tracked_slot_array(Some(Rect::ZERO), visual_dirty.clone()),
            flags: tracked_slot_array(Some(ElementFlags::empty()), interaction_dirty.clone()),
            attrs: RefCell::new(HashMap::new()),
            core_dirty,
            text_dirty,
            visual_dirty,
            interaction_dirty,
        }
    }

    /// Ensure arrays have capacity for the given index.
    pub(crate) fn ensure_capacity(&self, index: usize) {
        // TrackedSlotArray auto-expands on access
        let _ = self.tag.peek(index);
        let _ = self.parent.peek(index);
        let _ = self.classes.peek(index);
        let _ = self.text.peek(index);
        let _ = self.value.peek(index);
        let _ = self.min.peek(index);
        let _ = self.max.peek(index);
        let _ = self.style.peek(index);
        let _ = self.rect.peek(index);
        let _ = self.flags.peek(index);
    }

    /// Clear values at index (index is being released).
    pub(crate) fn clear_at_index(&self, index: usize) {
        self.tag.clear(index);
        self.parent.clear(index);
        self.classes.clear(index);
        self.text.clear(index);
        self.value.clear(index);
        self.min.clear(index);
        self.max.clear(index);
        self.style.clear(index);
        self.rect.clear(index);
        self.flags.clear(index);
        self.attrs.borrow_mut().remove(&index);
    }

    // =========================================================================
    // Dirty Sets
    // =========================================================================

    pub(crate) fn core_dirty(&self) -> DirtySet {
        self.core_dirty.clone()
    }

    pub(crate) fn text_dirty(&self) -> DirtySet {
        self.text_dirty.clone()
    }

    pub(crate) fn visual_dirty(&self) -> DirtySet {
        self.visual_dirty.clone()
    }

    pub(crate) fn interaction_dirty(&self) -> DirtySet {
        self.interaction_dirty.clone()
    }

    /// Clear all dirty sets (host consumed them).
    pub(crate) fn clear_dirty(&self) {
        self.core_dirty.borrow_mut().clear();
        self.text_dirty.borrow_mut().clear();
        self.visual_dirty.borrow_mut().clear();
        self.interaction_dirty.borrow_mut().clear();
    }

    // =========================================================================
    // Tag / Parent
    // =========================================================================

    pub(crate) fn tag(&self, index: usize) -> String {
        self.tag.get(index).unwrap_or_default()
    }

    pub(crate) fn set_tag(&self, index: usize, tag: String) {
        self.tag.set_value(index, tag);
    }

    pub(crate) fn parent(&self, index: usize) -> Option<usize> {
        self.parent.get(index).flatten()
    }

    pub(crate) fn set_parent(&self, index: usize, parent: Option<usize>) {
        self.parent.set_value(index, parent);
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn classes(&self, index: usize) -> String {
        self.classes.get(index).unwrap_or_default()
    }

    pub(crate) fn set_classes(&self, index: usize, classes: String) {
        self.classes.set_value(index, classes);
    }

    /// Non-tracking read for read-modify-write inside handlers.
    pub(crate) fn peek_classes(&self, index: usize) -> String {
        self.classes.peek(index).unwrap_or_default()
    }

    // =========================================================================
    // Text
    // =========================================================================

    pub(crate) fn text(&self, index: usize) -> String {
        self.text.get(index).unwrap_or_default()
    }

    pub(crate) fn set_text(&self, index: usize, text: String) {
        self.text.set_value(index, text);
    }

    // =========================================================================
    // Control Value / Bounds
    // =========================================================================

    pub(crate) fn value(&self, index: usize) -> String {
        self.value.get(index).unwrap_or_default()
    }

    pub(crate) fn set_value(&self, index: usize, value: String) {
        self.value.set_value(index, value);
    }

    pub(crate) fn min(&self, index: usize) -> i64 {
        self.min.get(index).unwrap_or(0)
    }

    pub(crate) fn set_min(&self, index: usize, min: i64) {
        self.min.set_value(index, min);
    }

    pub(crate) fn max(&self, index: usize) -> i64 {
        self.max.get(index).unwrap_or(100)
    }

    pub(crate) fn set_max(&self, index: usize, max: i64) {
        self.max.set_value(index, max);
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub(crate) fn style(&self, index: usize) -> StyleMap {
        self.style.get(index).unwrap_or_default()
    }

    pub(crate) fn peek_style(&self, index: usize) -> StyleMap {
        self.style.peek(index).unwrap_or_default()
    }

    pub(crate) fn set_style(&self, index: usize, style: StyleMap) {
        self.style.set_value(index, style);
    }

    // =========================================================================
    // Rect
    // =========================================================================

    pub(crate) fn rect(&self, index: usize) -> Rect {
        self.rect.get(index).unwrap_or(Rect::ZERO)
    }

    pub(crate) fn set_rect(&self, index: usize, rect: Rect) {
        self.rect.set_value(index, rect);
    }

    // =========================================================================
    // Flags
    // =========================================================================

    pub(crate) fn flags(&self, index: usize) -> ElementFlags {
        self.flags.peek(index).unwrap_or_default()
    }

    pub(crate) fn set_flags(&self, index: usize, flags: ElementFlags) {
        self.flags.set_value(index, flags);
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub(crate) fn attr(&self, index: usize, name: &str) -> Option<String> {
        self.attrs
            .borrow()
            .get(&index)
            .and_then(|map| map.get(name).cloned())
    }

    pub(crate) fn set_attr(&self, index: usize, name: String, value: String) {
        self.attrs
            .borrow_mut()
            .entry(index)
            .or_default()
            .insert(name, value);
    }

    pub(crate) fn has_attr(&self, index: usize, name: &str) -> bool {
        self.attrs
            .borrow()
            .get(&index)
            .is_some_and(|map| map.contains_key(name))
    }
}

// =============================================================================
// Tests
// =============================================================================
