//! Behaviors - Presentational glue wired to page elements.
//!
//! Each behavior is an independent initializer: locate its elements,
//! subscribe handlers, return a cleanup. None of them keeps state beyond
//! what the elements themselves carry, and each degrades to an inert
//! no-op when its markup is absent.

pub mod accordion;
pub mod counters;
pub mod menu;
pub mod navbar;
pub mod particles;
pub mod reveal;
pub mod smooth_scroll;
pub mod tilt;

pub use accordion::init_accordions;
pub use counters::{CounterConfig, Counters, init_counters};
pub use menu::init_mobile_menu;
pub use navbar::init_navbar;
pub use particles::{ParticleConfig, init_particles};
pub use reveal::init_reveal;
pub use smooth_scroll::init_smooth_scroll;
pub use tilt::init_tilt;
