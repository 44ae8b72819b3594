//! Card Tilt Behavior - Pointer-tracking perspective transform.
//!
//! On every pointer move, cards under the pointer get a rotate transform
//! proportional to the offset from their center, capped at ±3 degrees;
//! cards the pointer left get their transform cleared. Cards are queried
//! per event, so ones added later tilt too.

use tracing::debug;

use crate::page::events::on_mouse_move;
use crate::page::{ElementFlags, Page};
use crate::types::Cleanup;

/// Classes that opt an element into tilting.
pub const TILT_CLASSES: [&str; 2] = ["card", "testimonial-card"];

/// Maximum tilt around either axis, in degrees.
pub const MAX_TILT_DEG: f64 = 3.0;

const TRANSFORM_PROP: &str = "transform";

/// Wire the tilt handler. Always attaches; pages without cards simply
/// see no writes.
pub fn init_tilt(page: &Page) -> Cleanup {
    debug!("tilt behavior wired");
    on_mouse_move(page, |page, x, y| {
        for class in TILT_CLASSES {
            for card in page.elements_with_class(class) {
                apply(page, card, x, y);
            }
        }
    })
}

fn apply(page: &Page, card: usize, x: i32, y: i32) {
    let rect = page.rect(card);
    if rect.width <= 0 || rect.height <= 0 {
        return;
    }

    // Pointer coordinates are viewport-relative; rects are document
    // coordinates, offset by the current scroll.
    let local_x = (x - rect.x) as f64;
    let local_y = (y - (rect.y - page.scroll_y())) as f64;

    let inside = local_x >= 0.0
        && local_x <= rect.width as f64
        && local_y >= 0.0
        && local_y <= rect.height as f64;

    if inside {
        let center_x = rect.width as f64 / 2.0;
        let center_y = rect.height as f64 / 2.0;
        let rotate_x = ((local_y - center_y) / center_y) * -MAX_TILT_DEG;
        let rotate_y = ((local_x - center_x) / center_x) * MAX_TILT_DEG;
        // -0.0 would render as "-0.00deg"
        let rotate_x = if rotate_x == 0.0 { 0.0 } else { rotate_x };
        let rotate_y = if rotate_y == 0.0 { 0.0 } else { rotate_y };
        page.set_style(
            card,
            TRANSFORM_PROP,
            &format!(
                "perspective(1000px) rotateX({rotate_x:.2}deg) rotateY({rotate_y:.2}deg) translateY(-4px)"
            ),
        );
        page.insert_flags(card, ElementFlags::TILTED);
    } else if page.flags(card).contains(ElementFlags::TILTED) {
        page.clear_style(card, TRANSFORM_PROP);
        page.remove_flags(card, ElementFlags::TILTED);
    }
}

// =============================================================================
// Tests
// =============================================================================
