//! Mount API - Page-load bootstrap and lifecycle.
//!
//! [`mount`] wires every enabled behavior plus the calculator to a page,
//! runs the initial observation pass, and returns a handle. The host loop
//! feeds its clock to [`MountHandle::tick`] to drive counter animations
//! and calls [`MountHandle::unmount`] on teardown.
//!
//! Behaviors whose markup is absent simply do not activate; mounting
//! never fails on an incomplete page.
//!
//! # Example
//!
//! ```ignore
//! use pagewire::{mount, MountConfig, Page};
//!
//! let page = Page::new();
//! // ... host builds the element tree and supplies rects ...
//!
//! let handle = mount(&page, &MountConfig::default());
//! loop {
//!     // deliver input events, then advance animations
//!     handle.tick(&page, now_ms());
//! }
//! ```

use tracing::debug;

use crate::behaviors::{
    Counters, init_accordions, init_counters, init_mobile_menu, init_navbar, init_particles,
    init_reveal, init_smooth_scroll, init_tilt,
};
use crate::calculator::init_calculator;
use crate::config::MountConfig;
use crate::page::{Page, intersect};
use crate::types::Cleanup;

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`] for ticking animations and unmounting.
pub struct MountHandle {
    cleanups: Vec<Cleanup>,
    counters: Option<Counters>,
}

impl MountHandle {
    /// Advance time-based behaviors to the host clock.
    pub fn tick(&self, page: &Page, now_ms: u64) {
        if let Some(counters) = &self.counters {
            counters.tick(page, now_ms);
        }
    }

    /// Whether any counter animation is still running.
    pub fn has_running_animations(&self) -> bool {
        self.counters
            .as_ref()
            .is_some_and(|counters| counters.active() > 0)
    }

    /// Detach every behavior wired at mount.
    pub fn unmount(mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }
}

// =============================================================================
// Mount
// =============================================================================

/// Wire the enabled behaviors to a page.
///
/// Ends with an observation pass so reveal and counter elements already
/// in view trigger before any scrolling happens.
pub fn mount(page: &Page, config: &MountConfig) -> MountHandle {
    let mut cleanups = Vec::new();
    let mut counters = None;

    if config.navbar {
        cleanups.extend(init_navbar(page));
    }
    if config.reveal {
        cleanups.extend(init_reveal(page));
    }
    if config.counters {
        if let Some((runner, cleanup)) = init_counters(page, config.counter) {
            counters = Some(runner);
            cleanups.push(cleanup);
        }
    }
    if config.accordions {
        cleanups.extend(init_accordions(page));
    }
    if config.menu {
        cleanups.extend(init_mobile_menu(page));
    }
    if config.particles {
        cleanups.extend(init_particles(page, config.particle));
    }
    if config.calculator {
        cleanups.extend(init_calculator(page));
    }
    if config.smooth_scroll {
        cleanups.extend(init_smooth_scroll(page));
    }
    if config.tilt {
        cleanups.push(init_tilt(page));
    }

    debug!(wired = cleanups.len(), "page mounted");

    // Initial observation pass, after all observers are registered
    intersect::check_observers(page);

    MountHandle { cleanups, counters }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_on_empty_page_is_safe() {
        let page = Page::new();
        let handle = mount(&page, &MountConfig::default());
        // Only the tilt handler attaches unconditionally
        assert!(!handle.has_running_animations());
        handle.tick(&page, 0);
        handle.unmount();
    }

    #[test]
    fn test_disabled_behavior_not_wired() {
        let page = Page::new();
        let navbar = page.create_element("nav");
        page.add_class(navbar, "navbar");

        let config = MountConfig {
            navbar: false,
            ..MountConfig::default()
        };
        let _handle = mount(&page, &config);

        crate::page::events::dispatch(&page, crate::page::events::Event::Scroll { y: 500 });
        assert!(!page.has_class(navbar, "scrolled"));
    }

    #[test]
    fn test_unmount_detaches_behaviors() {
        let page = Page::new();
        let navbar = page.create_element("nav");
        page.add_class(navbar, "navbar");

        let handle = mount(&page, &MountConfig::default());
        handle.unmount();

        crate::page::events::dispatch(&page, crate::page::events::Event::Scroll { y: 500 });
        assert!(!page.has_class(navbar, "scrolled"));
    }
}
