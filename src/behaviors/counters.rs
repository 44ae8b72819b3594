//! Animated Counters - Eased count-up on first viewport entry.
//!
//! Elements carrying `data-counter` start a count-up from zero to the
//! attribute's value the first time half of them is visible. Progress
//! eases out cubically over the configured duration; each step writes
//! `<data-prefix><grouped digits><data-suffix>`.
//!
//! Time is injected: the host loop calls [`Counters::tick`] with its
//! clock, which advances every running animation. An element counts only
//! once, guarded by its COUNTED flag.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::decorated;
use crate::page::intersect::{IntersectOptions, observe};
use crate::page::{ElementFlags, Page};
use crate::types::{Cleanup, combine_cleanups};

/// Attribute holding the count-up target.
pub const COUNTER_ATTR: &str = "data-counter";
/// Attribute holding the rendered prefix.
pub const PREFIX_ATTR: &str = "data-prefix";
/// Attribute holding the rendered suffix.
pub const SUFFIX_ATTR: &str = "data-suffix";

/// Fraction of the element that must be visible to trigger.
pub const COUNTER_THRESHOLD: f64 = 0.5;

// =============================================================================
// Config
// =============================================================================

/// Counter tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Full count-up duration in milliseconds.
    pub duration_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { duration_ms: 2000 }
    }
}

// =============================================================================
// Easing
// =============================================================================

/// Ease-out cubic over `t` in [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

// =============================================================================
// Runner
// =============================================================================

struct CounterAnim {
    element: usize,
    target: i64,
    prefix: String,
    suffix: String,
    started_at: Option<u64>,
}

/// Running count-up animations, advanced by the host clock.
#[derive(Clone)]
pub struct Counters {
    anims: Rc<RefCell<Vec<CounterAnim>>>,
    duration_ms: u64,
}

impl Counters {
    /// Advance every running animation to `now_ms` and write the eased
    /// values. Finished animations land exactly on their target and are
    /// dropped.
    pub fn tick(&self, page: &Page, now_ms: u64) {
        let mut anims = self.anims.borrow_mut();
        anims.retain_mut(|anim| {
            let started = *anim.started_at.get_or_insert(now_ms);
            let elapsed = now_ms.saturating_sub(started);
            let progress = if self.duration_ms == 0 {
                1.0
            } else {
                (elapsed as f64 / self.duration_ms as f64).min(1.0)
            };
            let current = (ease_out_cubic(progress) * anim.target as f64).round() as i64;
            page.set_text(anim.element, &decorated(current, &anim.prefix, &anim.suffix));
            progress < 1.0
        });
    }

    /// Number of animations still running.
    pub fn active(&self) -> usize {
        self.anims.borrow().len()
    }
}

// =============================================================================
// Initialization
// =============================================================================

/// Wire counter observers. Returns None when no element carries
/// `data-counter`.
pub fn init_counters(page: &Page, config: CounterConfig) -> Option<(Counters, Cleanup)> {
    let targets = page.elements_with_attr(COUNTER_ATTR);
    if targets.is_empty() {
        return None;
    }
    debug!(count = targets.len(), "counter behavior wired");

    let counters = Counters {
        anims: Rc::new(RefCell::new(Vec::new())),
        duration_ms: config.duration_ms,
    };
    let options = IntersectOptions {
        threshold: COUNTER_THRESHOLD,
        root_margin_bottom: 0,
    };
    let cleanups = targets
        .into_iter()
        .map(|element| {
            let anims = counters.anims.clone();
            observe(page, element, options, move |page, element| {
                if page.flags(element).contains(ElementFlags::COUNTED) {
                    return;
                }
                page.insert_flags(element, ElementFlags::COUNTED);

                let target = page
                    .attr(element, COUNTER_ATTR)
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(0);
                anims.borrow_mut().push(CounterAnim {
                    element,
                    target,
                    prefix: page.attr(element, PREFIX_ATTR).unwrap_or_default(),
                    suffix: page.attr(element, SUFFIX_ATTR).unwrap_or_default(),
                    started_at: None,
                });
            })
        })
        .collect();
    Some((counters, combine_cleanups(cleanups)))
}

// =============================================================================
// Tests
// =============================================================================
