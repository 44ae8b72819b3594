//! Scroll Reveal Behavior - `visible` latch on viewport entry.
//!
//! Elements carrying a reveal class get `visible` the first time they
//! intersect the (slightly shrunk) viewport. The class is never removed;
//! staggered child delays are the stylesheet's business.

use tracing::debug;

use crate::page::Page;
use crate::page::intersect::{IntersectOptions, observe};
use crate::types::{Cleanup, combine_cleanups};

/// Classes that opt an element into the reveal behavior.
pub const REVEAL_CLASSES: [&str; 4] = ["reveal", "reveal-left", "reveal-right", "reveal-scale"];

/// Class applied on first viewport entry.
pub const VISIBLE_CLASS: &str = "visible";

/// Fraction of the element that must be visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Bottom viewport adjustment, so elements reveal only once they are
/// clearly above the fold.
pub const REVEAL_ROOT_MARGIN_BOTTOM: i32 = -50;

/// Wire reveal observers. Returns None when no element opts in.
pub fn init_reveal(page: &Page) -> Option<Cleanup> {
    let mut targets: Vec<usize> = Vec::new();
    for class in REVEAL_CLASSES {
        for element in page.elements_with_class(class) {
            if !targets.contains(&element) {
                targets.push(element);
            }
        }
    }
    if targets.is_empty() {
        return None;
    }
    debug!(count = targets.len(), "reveal behavior wired");

    let options = IntersectOptions {
        threshold: REVEAL_THRESHOLD,
        root_margin_bottom: REVEAL_ROOT_MARGIN_BOTTOM,
    };
    let cleanups = targets
        .into_iter()
        .map(|element| {
            observe(page, element, options, |page, element| {
                page.add_class(element, VISIBLE_CLASS);
            })
        })
        .collect();
    Some(combine_cleanups(cleanups))
}
