//! # pagewire
//!
//! Reactive page-behavior engine for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! pagewire wires interactive behaviors to an element tree the host has
//! already rendered. The tree is an explicit [`Page`] value - columnar
//! reactive arrays behind an id registry - never an implicit global, so
//! tests inject their own tree and several pages coexist. The host
//! delivers input through a synchronous event dispatch:
//!
//! ```text
//! host event → dispatch → behavior handlers → element cells → host render effects
//! ```
//!
//! Behaviors (navbar class, scroll reveal, counters, accordions, mobile
//! menu, particles, smooth scroll, card tilt) are independent stateless
//! initializers. The earnings calculator is the one real computation: a
//! pure engine whose recompute-and-render cycle is subscribed to its
//! three bound controls.
//!
//! ## Modules
//!
//! - [`page`] - element tree, events, intersection observers
//! - [`behaviors`] - presentational behaviors
//! - [`calculator`] - the earnings calculator (engine, binding, sync)
//! - [`format`] - digit grouping and currency text
//! - [`config`] / [`mount`] - bootstrap configuration and lifecycle

pub mod behaviors;
pub mod calculator;
pub mod config;
pub mod format;
pub mod mount;
pub mod page;
pub mod types;

// Re-export commonly used items
pub use types::{Cleanup, Rect, combine_cleanups};

pub use page::{DirtySet, ElementFlags, Page, StyleMap};

pub use page::events::{Event, dispatch, on_click, on_input, on_mouse_move, on_resize, on_scroll};

pub use page::intersect::{IntersectOptions, check_observers, intersection_ratio, observe};

pub use calculator::{
    CalculatorBinding, EarningsInputs, EarningsOutputs, MONTHS_PER_YEAR, WEEKS_PER_MONTH, compute,
    init_calculator,
};

pub use behaviors::{
    CounterConfig, Counters, ParticleConfig, init_accordions, init_counters, init_mobile_menu,
    init_navbar, init_particles, init_reveal, init_smooth_scroll, init_tilt,
};

pub use config::{ConfigError, MountConfig};

pub use mount::{MountHandle, mount};
